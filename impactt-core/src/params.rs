use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One scalar beamline setting.
///
/// Values render into the input file through `Display`: booleans become the
/// Fortran-style `1`/`0`, everything else prints as written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{}", if *v { 1 } else { 0 }),
            ParamValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

/// Named simulation settings, ordered by name.
///
/// Keys may be namespaced as `group:name` to address a consumer other than
/// the input file (the distribution generator uses `distgen:`). [`Params::split`]
/// partitions by group; keys without a namespace belong to
/// [`Params::INPUT_GROUP`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Group that un-namespaced keys belong to.
    pub const INPUT_GROUP: &'static str = "input";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Partition into per-group maps, stripping the `group:` prefix.
    pub fn split(&self) -> BTreeMap<String, Params> {
        let mut groups: BTreeMap<String, Params> = BTreeMap::new();
        for (key, value) in &self.0 {
            let (group, name) = match key.split_once(':') {
                Some((group, name)) => (group, name),
                None => (Self::INPUT_GROUP, key.as_str()),
            };
            groups
                .entry(group.to_string())
                .or_default()
                .insert(name, value.clone());
        }
        groups
    }

    /// Settings addressed to one group (empty when the group is absent).
    pub fn group(&self, name: &str) -> Params {
        self.split().remove(name).unwrap_or_default()
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, ParamValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(ParamValue::Int(32).to_string(), "32");
        assert_eq!(ParamValue::Float(0.25).to_string(), "0.25");
        assert_eq!(ParamValue::Bool(true).to_string(), "1");
        assert_eq!(ParamValue::Bool(false).to_string(), "0");
        assert_eq!(ParamValue::Str("2d".into()).to_string(), "2d");
    }

    #[test]
    fn split_by_group_prefix() {
        let mut p = Params::new();
        p.insert("total_charge", 0.25);
        p.insert("distgen:sigma_x", 1.5e-3);
        p.insert("distgen:n_particle", 10_000_i64);

        let groups = p.split();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups["input"].get("total_charge"),
            Some(&ParamValue::Float(0.25))
        );
        assert_eq!(
            groups["distgen"].get("n_particle"),
            Some(&ParamValue::Int(10_000))
        );
        assert!(groups["distgen"].get("total_charge").is_none());
    }

    #[test]
    fn ungrouped_params_all_land_in_input() {
        let mut p = Params::new();
        p.insert("a", 1_i64);
        p.insert("b", 2_i64);
        assert_eq!(p.group(Params::INPUT_GROUP), p);
        assert!(p.group("distgen").is_empty());
    }

    #[test]
    fn scalar_deserialization() {
        let p: Params =
            serde_json::from_str(r#"{"n": 3, "q": 0.5, "flag": true, "mode": "solenoid"}"#)
                .unwrap();
        assert_eq!(p.get("n"), Some(&ParamValue::Int(3)));
        assert_eq!(p.get("q"), Some(&ParamValue::Float(0.5)));
        assert_eq!(p.get("flag"), Some(&ParamValue::Bool(true)));
        assert_eq!(p.get("mode"), Some(&ParamValue::Str("solenoid".into())));
    }
}
