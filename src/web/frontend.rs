//! Embedded HTML/CSS/JS frontend for the bribemap dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>bribemap</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #ff5233;
  --green: #3fb950;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}
a { color: inherit; text-decoration: none; }

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header h1 span { color: var(--accent); }
nav { display: flex; gap: 4px; }
nav a {
  padding: 6px 14px;
  border-radius: var(--radius);
  color: var(--text-muted);
}
nav a.active, nav a:hover { background: var(--surface); color: var(--text); }

.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 12px; margin-bottom: 24px; }
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
}
.card .title { color: var(--text-muted); font-size: 12px; text-transform: uppercase; letter-spacing: .04em; }
.card .value { font-size: 24px; font-weight: 600; margin: 4px 0; }
.card .label { color: var(--text-muted); font-size: 12px; }

.error { color: var(--red); padding: 12px; border: 1px solid var(--red); border-radius: var(--radius); margin-bottom: 16px; }
.success { color: var(--green); padding: 12px; border: 1px solid var(--green); border-radius: var(--radius); margin-bottom: 16px; }
.muted { color: var(--text-muted); }

h2 { font-size: 16px; margin: 8px 0 12px; }

.tiles { display: grid; grid-template-columns: repeat(auto-fill, minmax(150px, 1fr)); gap: 6px; }
.tile {
  border-radius: 6px;
  padding: 10px;
  color: #1f1f1f;
  min-height: 64px;
  cursor: default;
}
.tile.link { cursor: pointer; outline: 1px solid transparent; }
.tile.link:hover { outline-color: var(--text); }
.tile .name { font-weight: 600; font-size: 12px; }
.tile .amt { font-size: 12px; }

.filters { display: flex; flex-wrap: wrap; gap: 8px; margin-bottom: 12px; }
input, select, textarea, button {
  background: var(--surface);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 6px 10px;
  font: inherit;
}
button { cursor: pointer; }
button.primary { background: var(--accent); border-color: var(--accent); color: #fff; }
button:disabled, select:disabled { opacity: .5; cursor: not-allowed; }

table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid var(--border); vertical-align: top; }
th { cursor: pointer; color: var(--text-muted); font-weight: 500; white-space: nowrap; }
td.num, th.num { text-align: right; }
.pager { display: flex; gap: 8px; align-items: center; margin-top: 12px; }

.bars .row { display: grid; grid-template-columns: 160px 1fr 110px 50px; gap: 8px; align-items: center; margin: 4px 0; }
.bars .bar { height: 10px; background: var(--accent); border-radius: 4px; }

form.report { max-width: 600px; }
form.report label { display: block; margin: 12px 0 4px; color: var(--text-muted); }
form.report input, form.report select, form.report textarea { width: 100%; }
form.report button { margin-top: 16px; }
.notice { padding: 12px; border: 1px solid var(--border); border-radius: var(--radius); color: var(--text-muted); margin-bottom: 16px; }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1><span>bribe</span>map</h1>
    <nav>
      <a href="#/" data-route="home">Home</a>
      <a href="#/explore" data-route="explore">Explore</a>
      <a href="#/submit" data-route="submit">Submit</a>
    </nav>
  </header>
  <main id="view"></main>
</div>
<script>
const view = document.getElementById('view');
let meta = null;

const inr = n => '₹' + Math.round(n || 0).toLocaleString('en-IN');
const esc = s => String(s ?? '').replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
const fmtDate = s => { const d = new Date(s); return isNaN(d) ? esc(s) : d.toLocaleDateString('en-IN', {day:'numeric', month:'short', year:'numeric'}); };

async function getJson(url, opts) {
  const res = await fetch(url, opts);
  const body = await res.json().catch(() => ({}));
  if (!res.ok) throw new Error(body.error || 'Request failed');
  return body;
}

async function loadMeta() {
  if (!meta) meta = await getJson('/api/meta');
  return meta;
}

function cards(list) {
  return '<div class="cards">' + list.map(c =>
    `<div class="card"><div class="title">${esc(c.title)}</div><div class="value">${esc(c.value)}</div><div class="label">${esc(c.label)}</div></div>`
  ).join('') + '</div>';
}

function chart(data) {
  if (!data || !data.slices.length) return '<p class="muted">No department data.</p>';
  const max = data.slices[0].value || 1;
  const fmt = (kind, v) => kind === 'amount' ? inr(v) : Math.round(v).toLocaleString('en-IN');
  return '<div class="bars">' + data.slices.map(s => {
    const pct = data.total ? (s.value / data.total * 100).toFixed(1) : '0.0';
    return `<div class="row"><span>${esc(s.label)}</span><div class="bar" style="width:${(s.value / max * 100).toFixed(1)}%"></div><span>${fmt(s.kind, s.value)}</span><span class="muted">${pct}%</span></div>`;
  }).join('') + `<div class="row"><strong>Total</strong><span></span><strong>${fmt(data.total_kind, data.total)}</strong><span></span></div></div>`;
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

async function renderHome() {
  view.innerHTML = cards([1, 2, 3].map(() => ({title: 'Loading...', value: '--', label: ''})));
  let data;
  try { data = await getJson('/api/home'); }
  catch (e) { view.innerHTML = `<div class="error">${esc(e.message)}</div>`; return; }

  let html = data.stats_error ? `<div class="error">${esc(data.stats_error)}</div>` : cards(data.cards);
  if (data.heatmap) {
    html += '<h2>Reported bribes by state</h2><div class="tiles">' + data.heatmap.rows.map(r => {
      const link = r.amount > 0 && r.code;
      return `<div class="tile${link ? ' link' : ''}" style="background:${r.color}" ${link ? `data-code="${esc(r.code)}"` : ''}>
        <div class="name">${esc(r.name)}</div><div class="amt">${inr(r.amount)} · ${r.reports} reports</div></div>`;
    }).join('') + '</div>';
  }
  html += '<p class="muted" style="margin-top:16px">Data is user-reported and not independently verified.</p>';
  view.innerHTML = html;
  view.querySelectorAll('.tile.link').forEach(t =>
    t.addEventListener('click', () => { location.hash = '#/state/' + t.dataset.code; }));
}

// ---------------------------------------------------------------------------
// Explore
// ---------------------------------------------------------------------------

const explore = { sort: 'date', dir: 'desc', page: 1, pageSize: null, filters: {} };
const COLUMNS = [
  ['location', 'Location'], ['department', 'Department'], ['description', 'Description'],
  ['amount', 'Amount'], ['state', 'State'], ['district', 'District'], ['city', 'City'], ['date', 'Date'],
];

async function renderExplore() {
  const m = await loadMeta();
  const f = explore.filters;
  const opt = (v, label, cur) => `<option value="${esc(v)}" ${cur === v ? 'selected' : ''}>${esc(label)}</option>`;
  view.innerHTML = `
    <div class="filters">
      <select id="f-state"><option value="">All states</option>${m.states.map(s => opt(s.code, s.label, f.state)).join('')}</select>
      <select id="f-department"><option value="">All departments</option>${m.departments.map(d => opt(d.value, d.label, f.department)).join('')}</select>
      <select id="f-amountRange"><option value="">Any amount</option>${m.amount_ranges.map(a => opt(a, a, f.amountRange)).join('')}</select>
      <select id="f-dateRange"><option value="">Any date</option>${[['last-month','Last month'],['last-year','Last year'],['older','Older']].map(([v,l]) => opt(v, l, f.dateRange)).join('')}</select>
      <input id="f-search" placeholder="Search descriptions" value="${esc(f.search || '')}">
      <button id="f-reset">Reset all</button>
    </div>
    <div id="grid"><p class="muted">Loading reports...</p></div>`;
  ['state', 'department', 'amountRange', 'dateRange', 'search'].forEach(k =>
    document.getElementById('f-' + k).addEventListener('change', e => {
      explore.filters[k] = e.target.value; explore.page = 1; loadGrid();
    }));
  document.getElementById('f-reset').addEventListener('click', () => {
    explore.filters = {}; explore.page = 1; renderExplore();
  });
  loadGrid();
}

async function loadGrid() {
  const grid = document.getElementById('grid');
  const q = new URLSearchParams({ sort: explore.sort, dir: explore.dir, page: explore.page });
  if (explore.pageSize) q.set('pageSize', explore.pageSize);
  Object.entries(explore.filters).forEach(([k, v]) => { if (v) q.set(k, v); });
  let data;
  try { data = await getJson('/api/reports?' + q); }
  catch (e) { grid.innerHTML = `<div class="error">${esc(e.message)}</div>`; return; }

  const arrow = col => data.sort.field === col ? (data.sort.direction === 'asc' ? ' ↑' : ' ↓') : '';
  const cell = (r, col) => ({
    location: esc(r.city ? `${r.city}, ${r.state}` : r.state),
    amount: inr(r.amount),
    date: fmtDate(r.date_reported),
  }[col] ?? esc(r[col]));
  grid.innerHTML = `
    <table><thead><tr>${COLUMNS.map(([c, h]) => `<th data-col="${c}" class="${c === 'amount' ? 'num' : ''}">${h}${arrow(c)}</th>`).join('')}</tr></thead>
    <tbody>${data.rows.length ? data.rows.map(r => `<tr>${COLUMNS.map(([c]) => `<td class="${c === 'amount' ? 'num' : ''}">${cell(r, c)}</td>`).join('')}</tr>`).join('')
      : `<tr><td colspan="${COLUMNS.length}" class="muted">No reports match the current filters.</td></tr>`}</tbody></table>
    <div class="pager">
      <button id="p-prev" ${data.page <= 1 ? 'disabled' : ''}>Prev</button>
      <span>Page ${data.page} of ${data.page_count} · ${data.total_matching} reports</span>
      <button id="p-next" ${data.page >= data.page_count ? 'disabled' : ''}>Next</button>
      <select id="p-size">${meta.page_size_options.map(s => `<option ${s === data.page_size ? 'selected' : ''}>${s}</option>`).join('')}</select>
    </div>
    <h2 style="margin-top:24px">Amount by department</h2>${chart(data.chart)}`;

  grid.querySelectorAll('th').forEach(th => th.addEventListener('click', () => {
    const col = th.dataset.col;
    if (explore.sort === col) explore.dir = explore.dir === 'asc' ? 'desc' : 'asc';
    else { explore.sort = col; explore.dir = 'desc'; }
    loadGrid();
  }));
  document.getElementById('p-prev').addEventListener('click', () => { explore.page = data.page - 1; loadGrid(); });
  document.getElementById('p-next').addEventListener('click', () => { explore.page = data.page + 1; loadGrid(); });
  document.getElementById('p-size').addEventListener('change', e => {
    explore.pageSize = e.target.value; explore.page = 1; loadGrid();
  });
}

// ---------------------------------------------------------------------------
// State details
// ---------------------------------------------------------------------------

async function renderState(code) {
  view.innerHTML = '<p class="muted">Loading state data...</p>';
  let data;
  try { data = await getJson('/api/state/' + encodeURIComponent(code)); }
  catch (e) { view.innerHTML = `<div class="error">${esc(e.message)}</div>`; return; }
  view.innerHTML = `<h2 style="font-size:22px">${esc(data.name)} Corruption Report</h2>
    <p class="muted" style="margin-bottom:16px">Detailed analysis and user reports for ${esc(data.name)}</p>
    ${cards(data.cards)}<h2>Reports by department</h2>${chart(data.chart)}`;
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

let successTimer = null;

async function renderSubmit() {
  const m = await loadMeta();
  view.innerHTML = `
    <form class="report" id="report-form">
      <div class="notice"><strong>Privacy Notice:</strong> This submission is anonymous and cannot be traced back to you.</div>
      <div id="status"></div>
      <label>State</label>
      <select name="state" required><option value="">Select State</option>${m.states.map(s => `<option value="${s.code}">${esc(s.label)}</option>`).join('')}</select>
      <label>District</label>
      <select name="district" disabled><option value="">Select District</option></select>
      <label>City / Mandal</label>
      <input name="city" placeholder="e.g. Mumbai" required>
      <label>Department / Office</label>
      <select name="department" required><option value="">Select Department</option>${m.departments.map(d => `<option value="${d.value}">${esc(d.label)}</option>`).join('')}</select>
      <label>Description of Incident</label>
      <textarea name="description" rows="4" placeholder="Describe what happened..." required></textarea>
      <label>Amount Paid (INR)</label>
      <input name="amount" inputmode="numeric" placeholder="0" required>
      <button class="primary" type="submit">Submit Report</button>
    </form>`;

  const form = document.getElementById('report-form');
  const district = form.elements.district;
  const status = document.getElementById('status');

  form.elements.state.addEventListener('change', async e => {
    const code = e.target.value;
    district.innerHTML = '<option value="">Select District</option>';
    if (!code) { district.disabled = true; return; }
    district.disabled = true;
    district.options[0].textContent = 'Loading...';
    try {
      const list = await getJson(`/api/states/${encodeURIComponent(code)}/districts`);
      district.innerHTML += list.map(d => `<option>${esc(d)}</option>`).join('');
    } catch (_) { /* leave the list empty */ }
    district.options[0].textContent = 'Select District';
    district.disabled = false;
  });

  form.elements.amount.addEventListener('input', e => {
    const digits = e.target.value.replace(/[^0-9]/g, '');
    e.target.value = digits ? parseInt(digits, 10).toLocaleString('en-IN') : '';
  });

  form.addEventListener('submit', async e => {
    e.preventDefault();
    const button = form.querySelector('button');
    button.disabled = true;
    button.textContent = 'Submitting...';
    status.innerHTML = '';
    const body = Object.fromEntries(new FormData(form));
    try {
      await getJson('/api/reports', { method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify(body) });
      form.reset();
      district.innerHTML = '<option value="">Select District</option>';
      district.disabled = true;
      status.innerHTML = '<div class="success">Report submitted successfully. Thank you for your contribution.</div>';
      clearTimeout(successTimer);
      successTimer = setTimeout(() => { status.innerHTML = ''; }, m.success_display_ms);
    } catch (err) {
      status.innerHTML = `<div class="error">${esc(err.message)}</div>`;
    } finally {
      button.disabled = false;
      button.textContent = 'Submit Report';
    }
  });
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

function route() {
  const hash = location.hash.replace(/^#/, '') || '/';
  const parts = hash.split('/').filter(Boolean);
  const name = parts[0] || 'home';
  document.querySelectorAll('nav a').forEach(a => a.classList.toggle('active', a.dataset.route === name));
  if (name === 'explore') return renderExplore();
  if (name === 'submit') return renderSubmit();
  if (name === 'state' && parts[1]) return renderState(parts[1]);
  return renderHome();
}

window.addEventListener('hashchange', route);
route();
</script>
</body>
</html>
"##;
