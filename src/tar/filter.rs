/// Requested entry names, each paired with whether an archive entry has
/// matched it yet. Order is the order the names were requested in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    names: Vec<(String, bool)>,
}

impl FilterSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(|n| (n.into(), false)).collect(),
        }
    }

    /// An empty set selects every entry.
    pub fn is_selecting_all(&self) -> bool {
        self.names.is_empty()
    }

    /// Mark the first unmatched requested name equal to `name` as found.
    ///
    /// Returns false when every requested copy of `name` was already matched,
    /// so a repeated archive entry is not selected a second time.
    pub fn matches_and_mark(&mut self, name: &[u8]) -> bool {
        match self
            .names
            .iter_mut()
            .find(|(requested, found)| !*found && requested.as_bytes() == name)
        {
            Some((_, found)) => {
                *found = true;
                true
            }
            None => false,
        }
    }

    /// Requested names never matched, in request order.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|(_, found)| !found)
            .map(|(name, _)| name.as_str())
    }
}
