pub(super) type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

#[must_use]
pub(super) fn read_non_empty_env(lookup: &EnvLookup<'_>, name: &str) -> Option<String> {
    lookup(name)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn read_env_usize(
    lookup: &EnvLookup<'_>,
    name: &str,
    default_value: usize,
    min_value: usize,
) -> usize {
    lookup(name)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|value| *value >= min_value)
        .unwrap_or(default_value)
}

/// Reads required variables while remembering every one that was absent,
/// so a single error can name all of them.
pub(super) struct RequiredEnv<'a> {
    lookup: &'a EnvLookup<'a>,
    missing: Vec<String>,
}

impl<'a> RequiredEnv<'a> {
    pub(super) fn new(lookup: &'a EnvLookup<'a>) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
        }
    }

    pub(super) fn require(&mut self, name: &str) -> String {
        match read_non_empty_env(self.lookup, name) {
            Some(value) => value,
            None => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    pub(super) fn into_missing(self) -> Vec<String> {
        self.missing
    }
}
