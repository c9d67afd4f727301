use super::*;

const STACK_GROW_BYTES: usize = 32 * 1024 * 1024;

/// A parsed page with the `sq-*` control bindings attached.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) markers: Markers,
    pub(crate) fault_policy: FaultPolicy,
    pub(crate) location: LocationState,
    pub(crate) trace: TraceState,
}

impl Page {
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }

    pub fn from_html(html: &str) -> Result<Self> {
        Self::builder().build(html)
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        Self::builder().url(url).build(html)
    }

    pub(crate) fn assemble(
        html: &str,
        url: String,
        markers: Markers,
        fault_policy: FaultPolicy,
        trace: TraceState,
    ) -> Result<Self> {
        let dom = parse_html(html)?;
        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            markers,
            fault_policy,
            location: LocationState::new(url),
            trace,
        };
        page.install_bindings()?;
        Ok(page)
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn fault_policy(&self) -> FaultPolicy {
        self.fault_policy
    }

    pub fn set_fault_policy(&mut self, policy: FaultPolicy) {
        self.fault_policy = policy;
    }

    /// Number of registered listeners, delegated ones included.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.attr(target, "disabled").is_some() {
            return Ok(());
        }
        stacker::grow(STACK_GROW_BYTES, || {
            self.dispatch_event(target, "click")?;
            Ok(())
        })
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(STACK_GROW_BYTES, || {
            self.dispatch_event(target, event)?;
            Ok(())
        })
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_string();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }
        if self.dom.attr(target, "disabled").is_some() || self.dom.attr(target, "readonly").is_some()
        {
            return Ok(());
        }

        stacker::grow(STACK_GROW_BYTES, || {
            self.dom.set_value(target, text)?;
            self.dispatch_event(target, "input")?;
            Ok(())
        })
    }

    pub fn url(&self) -> &str {
        &self.location.url
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.location.navigations)
    }

    /// Registers the document served when the page navigates to `url`.
    /// Relative URLs resolve against the current location.
    pub fn set_location_mock_page(&mut self, url: &str, html: &str) {
        let normalized = self.location.resolve(url);
        self.location.mock_pages.insert(normalized, html.to_string());
    }

    pub fn clear_location_mock_pages(&mut self) {
        self.location.mock_pages.clear();
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    /// `tag#id.class` labels of the element children of the first match.
    pub fn child_labels(&self, selector: &str) -> Result<Vec<String>> {
        let target = self.select_one(selector)?;
        Ok(self
            .dom
            .element_children(target)
            .into_iter()
            .map(|child| self.dom.node_label(child))
            .collect())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn attribute(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let matches = self.dom.query_selector_all(selector)?;
        if matches.len() != expected {
            let dom_snippet = matches
                .first()
                .map(|node| self.node_snippet(*node))
                .unwrap_or_default();
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: matches.len().to_string(),
                dom_snippet,
            });
        }
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_bindings(&mut self, enabled: bool) {
        self.trace.bindings = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }
}
