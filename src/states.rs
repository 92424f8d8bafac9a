//! Indian states and union territories.
//!
//! The backend keys reports and heatmap entries by two-letter code while the
//! map geometry is keyed by full name, so both directions are needed.

/// One state or union territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub code: &'static str,
    pub name: &'static str,
    /// Other spellings found in geometry files.
    pub aliases: &'static [&'static str],
}

const fn state(code: &'static str, name: &'static str) -> State {
    State {
        code,
        name,
        aliases: &[],
    }
}

pub const INDIAN_STATES: &[State] = &[
    state("AN", "Andaman and Nicobar Islands"),
    state("AP", "Andhra Pradesh"),
    state("AR", "Arunachal Pradesh"),
    state("AS", "Assam"),
    state("BR", "Bihar"),
    state("CH", "Chandigarh"),
    State {
        code: "CT",
        name: "Chhattisgarh",
        aliases: &["Chhatisgarh"],
    },
    State {
        code: "DH",
        name: "Dadra and Nagar Haveli and Daman and Diu",
        aliases: &["Dadra and Nagar Haveli", "Daman and Diu"],
    },
    State {
        code: "DL",
        name: "Delhi",
        aliases: &["NCT of Delhi"],
    },
    state("GA", "Goa"),
    state("GJ", "Gujarat"),
    state("HR", "Haryana"),
    state("HP", "Himachal Pradesh"),
    state("JK", "Jammu and Kashmir"),
    state("JH", "Jharkhand"),
    state("KA", "Karnataka"),
    state("KL", "Kerala"),
    state("LA", "Ladakh"),
    state("LD", "Lakshadweep"),
    state("MP", "Madhya Pradesh"),
    state("MH", "Maharashtra"),
    state("MN", "Manipur"),
    state("ML", "Meghalaya"),
    state("MZ", "Mizoram"),
    state("NL", "Nagaland"),
    State {
        code: "OR",
        name: "Odisha",
        aliases: &["Orissa"],
    },
    State {
        code: "PY",
        name: "Puducherry",
        aliases: &["Pondicherry"],
    },
    state("PB", "Punjab"),
    state("RJ", "Rajasthan"),
    state("SK", "Sikkim"),
    state("TN", "Tamil Nadu"),
    state("TG", "Telangana"),
    state("TR", "Tripura"),
    state("UP", "Uttar Pradesh"),
    State {
        code: "UT",
        name: "Uttarakhand",
        aliases: &["Uttaranchal"],
    },
    state("WB", "West Bengal"),
];

/// Look up a state by code (case-insensitive).
pub fn by_code(code: &str) -> Option<&'static State> {
    INDIAN_STATES
        .iter()
        .find(|s| s.code.eq_ignore_ascii_case(code.trim()))
}

/// Look up a state by full name or alias (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static State> {
    let name = name.trim();
    INDIAN_STATES.iter().find(|s| {
        s.name.eq_ignore_ascii_case(name) || s.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}

/// Full name for a code, or the input itself when the code is unknown.
pub fn display_name(code: &str) -> &str {
    by_code(code).map_or(code, |s| s.name)
}

/// Whether `value` names the given state by code, name or alias.
pub fn matches(value: &str, state: &str) -> bool {
    if value.trim().eq_ignore_ascii_case(state.trim()) {
        return true;
    }
    match (resolve(value), resolve(state)) {
        (Some(a), Some(b)) => a.code == b.code,
        _ => false,
    }
}

fn resolve(value: &str) -> Option<&'static State> {
    by_code(value).or_else(|| by_name(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<&str> = INDIAN_STATES.iter().map(|s| s.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), INDIAN_STATES.len());
    }

    #[test]
    fn lookup_by_code_and_alias() {
        assert_eq!(by_code("mh").map(|s| s.name), Some("Maharashtra"));
        assert_eq!(by_name("Orissa").map(|s| s.code), Some("OR"));
        assert!(by_code("XX").is_none());
    }

    #[test]
    fn display_name_falls_back_to_input() {
        assert_eq!(display_name("KA"), "Karnataka");
        assert_eq!(display_name("ZZ"), "ZZ");
    }

    #[test]
    fn matches_accepts_code_or_name() {
        assert!(matches("MH", "Maharashtra"));
        assert!(matches("maharashtra", "MH"));
        assert!(matches("Uttaranchal", "UT"));
        assert!(!matches("KA", "MH"));
    }
}
