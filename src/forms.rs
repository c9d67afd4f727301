use super::*;

/// Named control values in document order. A name may repeat; repeated
/// rows are how list fields travel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(String, String)>,
}

impl FormValues {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The list for `name`, or `None` when nothing or only a single blank
    /// value was submitted.
    pub fn list_or_none(&self, name: &str) -> Option<Vec<String>> {
        let values = self.get_all(name);
        match values.as_slice() {
            [] | [""] => None,
            _ => Some(values.into_iter().map(ToOwned::to_owned).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl Page {
    /// Collects successful controls under the first match of `selector`,
    /// the way a browser would build the submitted form data.
    pub fn form_values(&self, selector: &str) -> Result<FormValues> {
        let root = self.select_one(selector)?;
        let mut values = FormValues::default();
        for control in self.dom.query_selector_all_from(root, "input, select, textarea")? {
            let Some(name) = self.dom.attr(control, "name").filter(|name| !name.is_empty())
            else {
                continue;
            };
            if self.dom.attr(control, "disabled").is_some() {
                continue;
            }
            if let Some(value) = self.control_value(control)? {
                values.entries.push((name, value));
            }
        }
        Ok(values)
    }

    fn control_value(&self, control: NodeId) -> Result<Option<String>> {
        match self.dom.tag_name(control) {
            Some("select") => self.selected_option_value(control),
            Some("input") => {
                let kind = self
                    .dom
                    .attr(control, "type")
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                match kind.as_str() {
                    "button" | "submit" | "reset" | "image" | "file" => Ok(None),
                    "checkbox" | "radio" => {
                        if self.dom.attr(control, "checked").is_none() {
                            return Ok(None);
                        }
                        let value = self.dom.value(control)?;
                        Ok(Some(if value.is_empty() { "on".to_string() } else { value }))
                    }
                    _ => Ok(Some(self.dom.value(control)?)),
                }
            }
            _ => Ok(Some(self.dom.value(control)?)),
        }
    }

    fn selected_option_value(&self, select: NodeId) -> Result<Option<String>> {
        let options = self.dom.query_selector_all_from(select, "option")?;
        let chosen = options
            .iter()
            .copied()
            .find(|option| self.dom.attr(*option, "selected").is_some())
            .or_else(|| options.first().copied());
        Ok(chosen.map(|option| {
            self.dom
                .attr(option, "value")
                .unwrap_or_else(|| self.dom.text_content(option).trim().to_string())
        }))
    }
}
