use foldhash::{HashMap, HashMapExt};

/// Maps variable names found in formula text to slots of the value array.
///
/// Implement this to plug a custom naming scheme into the [`TreeBuilder`](crate::TreeBuilder).
/// Built-in constants (`pi`, `e`, `tau`) are resolved by the builder itself, after
/// the resolver had its chance, so a declared variable may shadow them.
pub trait VarResolver {
    /// Returns the value-array index of `ident`, or `None` if it is not a variable.
    fn resolve(&self, ident: &str) -> Option<usize>;
}

/// An ordered list of declared variable names, matched case-insensitively.
///
/// The position of a name in the list is its slot in the value array passed
/// to evaluation. When a name is declared twice the first slot wins; empty
/// names keep their slot but never match.
#[derive(Clone, Debug, Default)]
pub struct VariableNames {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl VariableNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            index.entry(name.to_lowercase()).or_insert(i);
        }
        Self { names, index }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl VarResolver for VariableNames {
    fn resolve(&self, ident: &str) -> Option<usize> {
        self.index.get(&ident.to_lowercase()).copied()
    }
}

/// Resolves nothing; every name must be a constant or a function.
pub struct NoVariables;

impl VarResolver for NoVariables {
    fn resolve(&self, _ident: &str) -> Option<usize> {
        None
    }
}
