use super::*;

const CLICK: &str = "click";
const UNDEFINED_URL: &str = "undefined";

impl Page {
    /// Attaches the delegated row listeners to the document, then runs the
    /// page-ready step.
    pub(crate) fn install_bindings(&mut self) -> Result<()> {
        let root = self.dom.root;
        let add = Markers::selector(&self.markers.add_button);
        let delete = Markers::selector(&self.markers.delete_button);
        self.listeners.add(
            root,
            CLICK,
            Listener {
                filter: ListenerFilter::TargetMatches(add.clone()),
                action: Action::AddRow,
            },
        );
        self.listeners.add(
            root,
            CLICK,
            Listener {
                filter: ListenerFilter::TargetMatches(delete.clone()),
                action: Action::RemoveRow,
            },
        );
        self.trace.line(
            TraceCategory::Binding,
            format!("delegated click listeners on document for {add} and {delete}"),
        );
        self.page_ready()
    }

    /// Binds every navigation button present right now. Buttons inserted
    /// later stay unbound.
    fn page_ready(&mut self) -> Result<()> {
        let selector = Markers::selector(&self.markers.nav_button);
        let buttons = self.dom.query_selector_all(&selector)?;
        for button in &buttons {
            self.listeners.add(
                *button,
                CLICK,
                Listener {
                    filter: ListenerFilter::Any,
                    action: Action::Navigate,
                },
            );
        }
        self.trace.line(
            TraceCategory::Binding,
            format!("page ready: bound {} {selector} element(s)", buttons.len()),
        );
        Ok(())
    }

    pub(crate) fn run_action(&mut self, action: Action, event: &mut EventState) -> Result<()> {
        match action {
            Action::Navigate => self.navigate_from_button(event),
            Action::AddRow => self.add_row(event.target),
            Action::RemoveRow => self.remove_row(event.target),
        }
    }

    fn navigate_from_button(&mut self, event: &mut EventState) -> Result<()> {
        let button = event.current_target;
        let target = match self.dom.dataset_get(button, &self.markers.url_key)? {
            Some(url) if !url.is_empty() => url,
            // an absent dataset entry reads as "undefined" in a browser
            url => {
                let label = self.dom.node_label(button);
                self.fault(
                    TraceCategory::Navigation,
                    Error::MissingDataUrl { button: label },
                )?;
                url.unwrap_or_else(|| UNDEFINED_URL.to_string())
            }
        };

        let to = self.location.navigate(&target);
        let from = self
            .location
            .navigations
            .last()
            .map(|nav| nav.from.clone())
            .unwrap_or_default();
        self.trace
            .line(TraceCategory::Navigation, format!("{from} -> {to}"));

        // listeners still queued on the old document are skipped
        event.propagation_stopped = true;
        self.load_document_for(&to)
    }

    fn add_row(&mut self, add_button: NodeId) -> Result<()> {
        let container = self
            .dom
            .previous_element_sibling(add_button)
            .filter(|container| self.dom.can_have_children(*container));
        let Some(container) = container else {
            let button = self.dom.node_label(add_button);
            return self.fault(TraceCategory::Row, Error::MissingContainer { button });
        };

        let input = self.dom.create_detached_element("input");
        self.dom.class_add(input, &self.markers.input)?;
        if let Some(name) = self
            .dom
            .dataset_get(container, "name")?
            .filter(|name| !name.is_empty())
        {
            self.dom.set_attr(input, "name", &name)?;
        }
        self.dom.append_child(container, input)?;

        let delete = self.dom.create_detached_element("button");
        self.dom.class_add(delete, &self.markers.button)?;
        self.dom.class_add(delete, &self.markers.delete_button)?;
        self.dom.set_text_content(delete, &self.markers.delete_label)?;
        self.dom.set_attr(delete, "type", "button")?;
        self.dom.set_attr(delete, "value", &self.markers.delete_value)?;
        self.dom.append_child(container, delete)?;

        let label = self.dom.node_label(container);
        self.trace
            .line(TraceCategory::Row, format!("appended row to {label}"));
        Ok(())
    }

    fn remove_row(&mut self, delete_button: NodeId) -> Result<()> {
        let previous = self.dom.previous_element_sibling(delete_button);
        let paired = previous.filter(|node| self.dom.class_contains(*node, &self.markers.input));
        let button_label = self.dom.node_label(delete_button);

        if let Some(input) = paired {
            self.dom.remove_node(input)?;
        }
        self.dom.remove_node(delete_button)?;

        if paired.is_some() {
            self.trace
                .line(TraceCategory::Row, format!("removed row of {button_label}"));
            return Ok(());
        }
        let previous = previous.map(|node| self.dom.node_label(node));
        self.fault(
            TraceCategory::Row,
            Error::BrokenPairing {
                button: button_label,
                previous,
            },
        )
    }

    fn fault(&mut self, category: TraceCategory, error: Error) -> Result<()> {
        match self.fault_policy {
            FaultPolicy::Silent => {
                self.trace.line(category, format!("ignored: {error}"));
                Ok(())
            }
            FaultPolicy::Strict => Err(error),
        }
    }

    /// A full page load: a registered mock page replaces the document and is
    /// bound afresh, anything else leaves an empty, unbound document.
    fn load_document_for(&mut self, url: &str) -> Result<()> {
        self.listeners.clear();
        match self.location.mock_pages.get(url).cloned() {
            Some(html) => {
                self.dom = parse_html(&html)?;
                self.install_bindings()
            }
            None => {
                self.dom = Dom::new();
                self.trace.line(
                    TraceCategory::Navigation,
                    format!("unloaded document; no page registered for {url}"),
                );
                Ok(())
            }
        }
    }
}
