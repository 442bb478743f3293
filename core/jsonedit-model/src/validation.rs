use std::collections::BTreeMap;

/// A single validation failure reported by the record engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field paths the message applies to; empty for record-level errors.
    pub member_names: Vec<String>,
    pub message: String,
}

/// Outcome of validating a record. Produced once per update attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Records an error against the given field path (`""` for the whole record).
    pub fn fail(&mut self, member: impl Into<String>, message: impl Into<String>) {
        let member = member.into();
        let member_names = if member.is_empty() { Vec::new() } else { vec![member] };
        self.errors.push(ValidationError {
            member_names,
            message: message.into(),
        });
    }

    /// Copies every (member, message) pair into form-level errors.
    pub fn add_to(&self, form: &mut FormErrors) {
        for error in &self.errors {
            if error.member_names.is_empty() {
                form.add("", &error.message);
            }
            for member in &error.member_names {
                form.add(member, &error.message);
            }
        }
    }

    /// All messages joined with `", "`, in the order they were reported.
    pub fn detail(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Form-level errors keyed by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, message: &str) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(key, messages)| messages.iter().map(move |m| (key.as_str(), m.as_str())))
    }
}
