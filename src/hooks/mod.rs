mod handles;
mod registry;
mod scope;
#[cfg(test)]
mod tests;

pub use handles::StateHandle;
pub use registry::{Cleanup, EffectHook, EffectInvocation, HookRegistry};
pub use scope::Scope;
