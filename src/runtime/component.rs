use std::fmt;
use std::sync::Arc;

use crate::hooks::Scope;

use super::element::Element;

/// Where a component is mounted. Renders that produce an equal id share hook
/// state, so the field bindings made by `use_prompt_field` survive them. A
/// different name at the same position is a different component: its
/// fields bind anew and the old ones are released on prune.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId {
    path: Arc<[usize]>,
    key: Option<Arc<str>>,
    name: &'static str,
}

impl ComponentId {
    pub fn new(path: &[usize], name: &'static str, key: Option<&str>) -> Self {
        Self {
            path: path.into(),
            key: key.map(Arc::from),
            name,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

/// `0.2#key:Name`
impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.path.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        if let Some(key) = &self.key {
            write!(f, "#{key}")?;
        }
        write!(f, ":{}", self.name)
    }
}

pub type ComponentFn = Arc<dyn Fn(&mut Scope) -> Element + Send + Sync>;

/// A function of hook state to an element tree. Screens holding prompt
/// fields are components so their bindings outlive a single render.
#[derive(Clone)]
pub struct ComponentElement {
    pub(crate) name: &'static str,
    pub(crate) key: Option<String>,
    pub(crate) render: ComponentFn,
}

impl ComponentElement {
    pub fn new<F>(name: &'static str, render: F) -> Self
    where
        F: Fn(&mut Scope) -> Element + Send + Sync + 'static,
    {
        Self {
            name,
            key: None,
            render: Arc::new(render),
        }
    }

    /// Distinguishes siblings of the same name, e.g. one form per account.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn mount_id(&self, path: &[usize]) -> ComponentId {
        ComponentId::new(path, self.name, self.key.as_deref())
    }
}

impl From<ComponentElement> for Element {
    fn from(value: ComponentElement) -> Self {
        Element::Component(value)
    }
}

impl fmt::Debug for ComponentElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentElement")
            .field("name", &self.name)
            .field("key", &self.key)
            .finish()
    }
}

pub fn component<F>(name: &'static str, render: F) -> ComponentElement
where
    F: Fn(&mut Scope) -> Element + Send + Sync + 'static,
{
    ComponentElement::new(name, render)
}
