//! # ESM Rewrite Engine
//!
//! Rewrites the static module syntax of one ES module into calls against a
//! runtime loader, so the module can be evaluated as a plain async function
//! body.
//!
//! ## Output Shape
//!
//! 1. **Imports**: `import { ref } from 'vue'` becomes
//!    `const __esm_import_0__ = await __esm_import__("vue");` and every use of
//!    `ref` becomes `__esm_import_0__.ref`.
//!
//! 2. **Exports**: every exported name is registered as a live getter on the
//!    exports object with `Object.defineProperty`. `export *` calls the
//!    export-all helper with the source's alias.
//!
//! 3. **Shadowing**: a use is rewritten only when the nearest declaration of
//!    its name is the import itself. Parameters, `let`/`const`/`var`,
//!    function and class names, catch parameters and destructured bindings
//!    all shadow, for the whole scope they are declared in.
//!
//! 4. **Special forms**: `import(x)` and `import.meta` go to their runtime
//!    keys; a class declaration extending an import gets a local constant
//!    hoisted in front of it.
//!
//! Rewrites are recorded as span edits against the original text and applied
//! once, so untouched code keeps its exact formatting.

mod bindings;
mod context;
mod edits;
mod error;
mod exports;
mod imports;
mod options;
mod parse;
mod renamer;
mod scope;
mod special;
mod transform;

#[cfg(test)]
mod shadowing_tests;

pub use bindings::{AccessPath, BindingTable, ImportRecord};
pub use edits::{Edit, EditList};
pub use error::*;
pub use options::RewriteOptions;
pub use parse::{parse_module, source_type_for};
pub use scope::{DeclarationKind, Resolution, ScopeTree};
pub use transform::{
    transform_batch, transform_module, transform_modules, BatchEntry, BatchError, ModuleSource,
    TransformOutput,
};

#[cfg(feature = "napi")]
pub use transform::{transform_esm_batch_native, transform_esm_native};
