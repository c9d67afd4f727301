use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceCategory {
    Event,
    Binding,
    Navigation,
    Row,
}

impl TraceCategory {
    fn prefix(self) -> &'static str {
        match self {
            Self::Event => "[event]",
            Self::Binding => "[bind]",
            Self::Navigation => "[nav]",
            Self::Row => "[row]",
        }
    }
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) bindings: bool,
    pub(crate) to_stderr: bool,
    pub(crate) log_limit: usize,
    pub(crate) logs: Vec<String>,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            bindings: true,
            to_stderr: true,
            log_limit: 10_000,
            logs: Vec::new(),
        }
    }
}

impl TraceState {
    pub(crate) fn line(&mut self, category: TraceCategory, message: impl AsRef<str>) {
        if !self.enabled {
            return;
        }
        match category {
            TraceCategory::Event if !self.events => return,
            TraceCategory::Binding if !self.bindings => return,
            _ => {}
        }

        let line = format!("{} {}", category.prefix(), message.as_ref());
        if self.to_stderr {
            eprintln!("{line}");
        }
        if self.logs.len() >= self.log_limit {
            self.logs.remove(0);
        }
        self.logs.push(line);
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.log_limit = max_entries;
        if self.logs.len() > max_entries {
            let excess = self.logs.len() - max_entries;
            self.logs.drain(..excess);
        }
        Ok(())
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }
}
