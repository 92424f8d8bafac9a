//! Static map geometry source.
//!
//! The heatmap only needs to know which states the geometry file draws, so
//! the TopoJSON is reduced to the list of state names on its geometries.

use std::time::Duration;

use serde_json::Value;

use super::{ApiError, classify};
use crate::diagnostics::Diagnostics;

/// Anything that can list the state names drawn by the map geometry.
pub trait TopologySource {
    fn state_names(&self) -> Result<Vec<String>, ApiError>;
}

/// Fetches the third-party TopoJSON file over HTTP.
#[derive(Debug)]
pub struct TopologyClient {
    url: String,
    agent: ureq::Agent,
    diagnostics: Diagnostics,
}

impl TopologyClient {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            url: url.to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            diagnostics: Diagnostics::disabled(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Value, ApiError> {
        let response = self.agent.get(&self.url).call().map_err(classify)?;
        response.into_json::<Value>().map_err(|e| ApiError::Parse {
            message: e.to_string(),
        })
    }
}

impl TopologySource for TopologyClient {
    fn state_names(&self) -> Result<Vec<String>, ApiError> {
        let result = self.fetch().and_then(|topology| {
            let names = geometry_names(&topology);
            if names.is_empty() {
                Err(ApiError::Parse {
                    message: "topology has no named geometries".to_string(),
                })
            } else {
                Ok(names)
            }
        });
        if let Err(err) = &result {
            self.diagnostics.record("topology", &self.url, err);
        }
        result
    }
}

/// Collect geometry names from every object in a TopoJSON document.
///
/// Reads `properties.NAME_1`, falling back to `properties.name`. Duplicates
/// (states split into several geometries) are kept once, in file order.
pub fn geometry_names(topology: &Value) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let Some(objects) = topology.get("objects").and_then(Value::as_object) else {
        return names;
    };

    for object in objects.values() {
        let Some(geometries) = object.get("geometries").and_then(Value::as_array) else {
            continue;
        };
        for geometry in geometries {
            let props = geometry.get("properties");
            let name = props
                .and_then(|p| p.get("NAME_1"))
                .or_else(|| props.and_then(|p| p.get("name")))
                .and_then(Value::as_str);
            if let Some(name) = name
                && !names.iter().any(|n| n == name)
            {
                names.push(name.to_string());
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_names_with_fallback_and_dedup() {
        let topology = serde_json::json!({
            "type": "Topology",
            "objects": {
                "india": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "Polygon", "properties": {"NAME_1": "Maharashtra"}},
                        {"type": "Polygon", "properties": {"name": "Karnataka"}},
                        {"type": "Polygon", "properties": {"NAME_1": "Maharashtra"}},
                        {"type": "Polygon"}
                    ]
                }
            }
        });
        assert_eq!(geometry_names(&topology), vec!["Maharashtra", "Karnataka"]);
    }

    #[test]
    fn non_topology_yields_nothing() {
        assert!(geometry_names(&serde_json::json!({"type": "FeatureCollection"})).is_empty());
    }
}
