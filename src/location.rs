use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default)]
pub(crate) struct LocationState {
    pub(crate) url: String,
    pub(crate) navigations: Vec<LocationNavigation>,
    pub(crate) mock_pages: HashMap<String, String>,
}

impl LocationState {
    pub(crate) fn new(url: String) -> Self {
        Self {
            url,
            ..Self::default()
        }
    }

    pub(crate) fn normalize_initial_url(url: &str) -> Result<String> {
        UrlParts::parse(url.trim())
            .map(|parts| parts.href())
            .ok_or_else(|| Error::Config(format!("page url must be absolute: {url:?}")))
    }

    pub(crate) fn resolve(&self, target: &str) -> String {
        match UrlParts::parse(&self.url) {
            Some(base) => base.resolve(target),
            None => target.trim().to_string(),
        }
    }

    /// Records a location change and returns the resolved target.
    pub(crate) fn navigate(&mut self, target: &str) -> String {
        let to = self.resolve(target);
        let from = std::mem::replace(&mut self.url, to.clone());
        self.navigations.push(LocationNavigation {
            from,
            to: to.clone(),
        });
        to
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct UrlParts {
    scheme: String,
    authority: Option<String>,
    path: String,
    query: String,
    fragment: String,
}

impl UrlParts {
    fn parse(src: &str) -> Option<Self> {
        let scheme_end = scheme_end(src)?;
        let scheme = src[..scheme_end].to_ascii_lowercase();
        let mut rest = &src[scheme_end + 1..];

        let (rest_without_fragment, fragment) = match rest.find('#') {
            Some(pos) => (&rest[..pos], rest[pos..].to_string()),
            None => (rest, String::new()),
        };
        rest = rest_without_fragment;
        let (rest_without_query, query) = match rest.find('?') {
            Some(pos) => (&rest[..pos], rest[pos..].to_string()),
            None => (rest, String::new()),
        };
        rest = rest_without_query;

        let (authority, path) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find('/').unwrap_or(after.len());
                let path = if end == after.len() { "/" } else { &after[end..] };
                (
                    Some(after[..end].to_ascii_lowercase()),
                    normalize_path(path),
                )
            }
            None => (None, rest.to_string()),
        };

        Some(Self {
            scheme,
            authority,
            path,
            query,
            fragment,
        })
    }

    fn href(&self) -> String {
        let mut out = format!("{}:", self.scheme);
        if let Some(authority) = &self.authority {
            out.push_str("//");
            out.push_str(authority);
        }
        out.push_str(&self.path);
        out.push_str(&self.query);
        out.push_str(&self.fragment);
        out
    }

    fn resolve(&self, input: &str) -> String {
        let input = input.trim();
        if input.is_empty() {
            let mut next = self.clone();
            next.fragment.clear();
            return next.href();
        }

        if scheme_end(input).is_some() {
            return UrlParts::parse(input)
                .map(|parts| parts.href())
                .unwrap_or_else(|| input.to_string());
        }

        if input.starts_with("//") {
            return UrlParts::parse(&format!("{}:{input}", self.scheme))
                .map(|parts| parts.href())
                .unwrap_or_else(|| input.to_string());
        }

        let mut next = self.clone();
        next.fragment.clear();
        if let Some(fragment) = input.strip_prefix('#') {
            next.fragment = format!("#{fragment}");
            return next.href();
        }

        let (before_fragment, fragment) = match input.find('#') {
            Some(pos) => (&input[..pos], input[pos..].to_string()),
            None => (input, String::new()),
        };
        next.fragment = fragment;
        let (path, query) = match before_fragment.find('?') {
            Some(pos) => (&before_fragment[..pos], before_fragment[pos..].to_string()),
            None => (before_fragment, String::new()),
        };
        next.query = query;

        if path.is_empty() {
            return next.href();
        }
        next.path = if path.starts_with('/') {
            normalize_path(path)
        } else {
            let dir_end = self.path.rfind('/').map(|pos| pos + 1).unwrap_or(0);
            let base_dir = if dir_end == 0 { "/" } else { &self.path[..dir_end] };
            normalize_path(&format!("{base_dir}{path}"))
        };
        next.href()
    }
}

fn scheme_end(src: &str) -> Option<usize> {
    let end = src.find(':')?;
    let scheme = &src[..end];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    chars
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
        .then_some(end)
}

fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let trailing_slash = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut out = String::from("/");
    out.push_str(&segments.join("/"));
    if trailing_slash && !segments.is_empty() {
        out.push('/');
    }
    out
}
