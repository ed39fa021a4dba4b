/// An icon described only by names to look up in an icon theme.
///
/// Names are ordered from most to least specific; an icon theme tries them in
/// that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemedIcon {
    names: Vec<String>,
}

impl ThemedIcon {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn get_names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }

    /// Prepends a `-symbolic` variant of every name, keeping the plain names as
    /// fallbacks after them.
    pub fn to_symbolic(&self) -> Self {
        let symbolic = self.names.iter().map(|name| format!("{}-symbolic", name));
        Self {
            names: symbolic.chain(self.names.iter().cloned()).collect(),
        }
    }

    /// Appends a `-symbolic` variant of every name after all the plain names,
    /// skipping names that are already symbolic or already listed.
    pub fn with_symbolic_variants(mut self) -> Self {
        let variants: Vec<String> = self
            .names
            .iter()
            .filter(|name| !name.is_empty() && !name.ends_with("-symbolic"))
            .map(|name| format!("{}-symbolic", name))
            .collect();

        for variant in variants {
            if !self.names.contains(&variant) {
                self.names.push(variant);
            }
        }
        self
    }
}
