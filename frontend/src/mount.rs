use std::marker::PhantomData;

use web_sys::{window, Document, Element};
use yew::{AppHandle, BaseComponent, Renderer};

use crate::config::MountTarget;
use crate::error::{describe_js, StartupError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MountState {
    #[default]
    Unmounted,
    Mounted,
}

/// Builds the application instance and attaches it to a mount target.
pub trait Mounter {
    type Handle;

    fn mount(&self, target: &MountTarget) -> Result<Self::Handle, StartupError>;
}

/// Looks up the mount target. Nothing in the document is touched.
pub fn resolve_target(document: &Document, target: &MountTarget) -> Result<Element, StartupError> {
    let selector = target.selector();
    document
        .query_selector(selector)
        .map_err(|err| StartupError::InvalidSelector {
            selector: selector.to_string(),
            reason: describe_js(&err),
        })?
        .ok_or_else(|| StartupError::TargetMissing {
            selector: selector.to_string(),
        })
}

/// Mounts root component `R` into the live page document through Yew.
pub struct DomMounter<R> {
    _root: PhantomData<R>,
}

impl<R> DomMounter<R> {
    pub fn new() -> Self {
        Self { _root: PhantomData }
    }
}

impl<R> Default for DomMounter<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Mounter for DomMounter<R>
where
    R: BaseComponent,
    R::Properties: Default,
{
    type Handle = AppHandle<R>;

    fn mount(&self, target: &MountTarget) -> Result<AppHandle<R>, StartupError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(StartupError::NoDocument)?;
        let root = resolve_target(&document, target)?;
        Ok(Renderer::<R>::with_root(root).render())
    }
}
