use super::*;
use fancy_regex::Regex;

pub(crate) const DEFAULT_PAGE_URL: &str = "http://localhost/";

// CSS identifier as used for marker classes; leading "--" and "-<digit>" are rejected.
const CLASS_NAME_PATTERN: &str = r"^(?!--)(?!-\d)-?[_a-zA-Z][_a-zA-Z0-9-]*$";
const DATASET_KEY_PATTERN: &str = r"^[a-z][a-zA-Z0-9]*$";

/// Marker classes and attribute names the page bindings key on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub nav_button: String,
    /// Camel-cased dataset key; `"url"` reads `data-url`.
    pub url_key: String,
    pub add_button: String,
    pub input: String,
    pub delete_button: String,
    pub button: String,
    pub delete_label: String,
    pub delete_value: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            nav_button: "sq-button".to_string(),
            url_key: "url".to_string(),
            add_button: "sq-add-button".to_string(),
            input: "sq-input".to_string(),
            delete_button: "sq-delete-button".to_string(),
            button: "btn".to_string(),
            delete_label: "Delete".to_string(),
            delete_value: "delete".to_string(),
        }
    }
}

impl Markers {
    pub fn validate(&self) -> Result<()> {
        let class_name = compile(CLASS_NAME_PATTERN)?;
        for (field, value) in [
            ("nav_button", &self.nav_button),
            ("add_button", &self.add_button),
            ("input", &self.input),
            ("delete_button", &self.delete_button),
            ("button", &self.button),
        ] {
            if !is_match(&class_name, value)? {
                return Err(Error::Config(format!(
                    "{field} is not a valid class name: {value:?}"
                )));
            }
        }

        let dataset_key = compile(DATASET_KEY_PATTERN)?;
        if !is_match(&dataset_key, &self.url_key)? {
            return Err(Error::Config(format!(
                "url_key is not a valid dataset key: {:?}",
                self.url_key
            )));
        }

        let roles = [
            &self.nav_button,
            &self.add_button,
            &self.input,
            &self.delete_button,
        ];
        for (idx, role) in roles.iter().enumerate() {
            if roles[idx + 1..].contains(role) {
                return Err(Error::Config(format!(
                    "marker class {role:?} is used for more than one role"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn selector(class_name: &str) -> String {
        format!(".{class_name}")
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|err| Error::Config(format!("invalid pattern {pattern}: {err}")))
}

fn is_match(regex: &Regex, value: &str) -> Result<bool> {
    regex
        .is_match(value)
        .map_err(|err| Error::Config(format!("pattern match failed for {value:?}: {err}")))
}

/// How the bindings react to markup that breaks their assumptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Skip the faulty step and leave a trace diagnostic.
    #[default]
    Silent,
    /// Surface the fault as an [`Error`] from the user action.
    Strict,
}

#[derive(Debug, Clone)]
pub struct PageBuilder {
    url: String,
    markers: Markers,
    fault_policy: FaultPolicy,
    trace: bool,
    trace_stderr: bool,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self {
            url: DEFAULT_PAGE_URL.to_string(),
            markers: Markers::default(),
            fault_policy: FaultPolicy::default(),
            trace: false,
            trace_stderr: true,
        }
    }
}

impl PageBuilder {
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    pub fn trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn trace_stderr(mut self, enabled: bool) -> Self {
        self.trace_stderr = enabled;
        self
    }

    pub fn build(self, html: &str) -> Result<Page> {
        self.markers.validate()?;
        let url = LocationState::normalize_initial_url(&self.url)?;
        let trace = TraceState {
            enabled: self.trace,
            to_stderr: self.trace_stderr,
            ..TraceState::default()
        };
        Page::assemble(html, url, self.markers, self.fault_policy, trace)
    }
}
