use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Navigate,
    AddRow,
    RemoveRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListenerFilter {
    Any,
    /// Delegation: run only when the event target matches the selector.
    TargetMatches(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Listener {
    pub(crate) filter: ListenerFilter,
    pub(crate) action: Action,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            propagation_stopped: false,
        }
    }
}

impl Page {
    /// Bubbles `event_type` from `target` up to the document.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        // navigation may swap the document out from under the target
        let target_label = self.dom.node_label(target);

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        for node in path {
            event.current_target = node;
            self.invoke_listeners(node, &mut event)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, &target_label, "propagation_stopped");
                return Ok(event);
            }
        }

        self.trace_event_done(&event, &target_label, "completed");
        Ok(event)
    }

    fn invoke_listeners(&mut self, node_id: NodeId, event: &mut EventState) -> Result<()> {
        let listeners = self.listeners.get(node_id, &event.event_type);
        for listener in listeners {
            if let ListenerFilter::TargetMatches(selector) = &listener.filter {
                if !self.dom.matches_selector(event.target, selector)? {
                    continue;
                }
            }
            let target_label = self.dom.node_label(event.target);
            let current_label = self.dom.node_label(event.current_target);
            self.trace.line(
                TraceCategory::Event,
                format!(
                    "{} target={} current={} action={:?}",
                    event.event_type, target_label, current_label, listener.action
                ),
            );
            self.run_action(listener.action, event)?;
            if event.propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    fn trace_event_done(&mut self, event: &EventState, target_label: &str, outcome: &str) {
        self.trace.line(
            TraceCategory::Event,
            format!(
                "done {} target={} outcome={}",
                event.event_type, target_label, outcome
            ),
        );
    }
}
