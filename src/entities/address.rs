use serde::{Deserialize, Serialize};

pub const MAX_TEXT_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntry {
    pub id: String,
    #[serde(alias = "address")]
    pub text: String,
    #[serde(default = "selected_by_default")]
    pub is_selected: bool,
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_destination: bool,
    #[serde(default)]
    pub is_home: bool,
}

fn selected_by_default() -> bool {
    true
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Start,
    Destination,
    Home,
}

impl AddressEntry {
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            is_selected: true,
            is_start: false,
            is_destination: false,
            is_home: false,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Start => self.is_start,
            Role::Destination => self.is_destination,
            Role::Home => self.is_home,
        }
    }

    pub fn set_role_flag(&mut self, role: Role, value: bool) {
        match role {
            Role::Start => self.is_start = value,
            Role::Destination => self.is_destination = value,
            Role::Home => self.is_home = value,
        }
    }

    /// Start, destination and home entries are always part of a route.
    pub fn holds_any_role(&self) -> bool {
        self.is_start || self.is_destination || self.is_home
    }
}

/// Trims `text` and checks it against the 1..=200 character bound.
pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();

    if len == 0 || len > MAX_TEXT_LEN {
        return None;
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(normalize_text(""), None);
        assert_eq!(normalize_text(" "), None);
        assert_eq!(normalize_text("\t\n"), None);
    }

    #[test]
    fn text_is_trimmed_before_measuring() {
        let padded = format!("  {}  ", "a".repeat(MAX_TEXT_LEN));
        assert_eq!(normalize_text(&padded), Some("a".repeat(MAX_TEXT_LEN)));
        assert_eq!(normalize_text(&"a".repeat(MAX_TEXT_LEN + 1)), None);
    }

    #[test]
    fn legacy_home_entries_deserialize() {
        let entry: AddressEntry =
            serde_json::from_str(r#"{"id":"1","address":"A St","isHome":true}"#).unwrap();

        assert_eq!(entry.text, "A St");
        assert!(entry.is_selected);
        assert!(entry.is_home);
        assert!(!entry.is_start);
    }

    #[test]
    fn entries_serialize_with_camel_case_flags() {
        let entry = AddressEntry::new("7".into(), "B St".into());
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["isSelected"], true);
        assert_eq!(value["isDestination"], false);
        assert_eq!(value["text"], "B St");
    }
}
