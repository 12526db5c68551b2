//! Script runtime management
//!
//! Owns a QuickJS runtime with the `Word` class and a `print()` helper
//! installed on the global object.

use std::path::Path;

use rquickjs::function::IntoArgs;
use rquickjs::{CatchResultExt, Class, Context, Ctx, FromJs, Function, Runtime};

use crate::error::ScriptError;
use crate::word::Word;

/// Script execution context
pub struct ScriptRuntime {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    pub context: Context,
}

impl ScriptRuntime {
    pub fn new() -> Result<Self, ScriptError> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;

        context.with(|ctx| install_globals(&ctx))?;
        tracing::debug!("script runtime ready, Word class registered");

        Ok(Self { runtime, context })
    }

    pub fn execute_file(&self, path: &Path) -> Result<(), ScriptError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "executing script file");
        self.execute(&source)
    }

    pub fn execute(&self, source: &str) -> Result<(), ScriptError> {
        self.eval::<()>(source)
    }

    /// Evaluate `source` and convert its completion value.
    pub fn eval<T>(&self, source: &str) -> Result<T, ScriptError>
    where
        T: for<'js> FromJs<'js>,
    {
        self.context.with(|ctx| {
            ctx.eval::<T, _>(source)
                .catch(&ctx)
                .map_err(|caught| ScriptError::Exception {
                    message: caught.to_string(),
                })
        })
    }

    /// Copy out the bytes held by the `Word` stored in global `name`.
    pub fn word_bytes(&self, name: &str) -> Result<Vec<u8>, ScriptError> {
        self.context.with(|ctx| {
            let word: Class<Word> = ctx.globals().get(name)?;
            let bytes = word.borrow().buffer().get();
            Ok(bytes)
        })
    }

    /// Call a global JavaScript function by name with no arguments.
    pub fn call_function(&self, name: &str) -> Result<(), ScriptError> {
        self.call::<_, ()>(name, ())
    }

    /// Call a global JavaScript function by name.
    pub fn call<A, R>(&self, name: &str, args: A) -> Result<R, ScriptError>
    where
        A: for<'js> IntoArgs<'js>,
        R: for<'js> FromJs<'js>,
    {
        self.context.with(|ctx| {
            let func: Function = ctx.globals().get(name)?;
            func.call::<A, R>(args)
                .catch(&ctx)
                .map_err(|caught| ScriptError::Exception {
                    message: caught.to_string(),
                })
        })
    }
}

fn install_globals(ctx: &Ctx<'_>) -> rquickjs::Result<()> {
    let globals = ctx.globals();
    Class::<Word>::define(&globals)?;

    let print_fn = Function::new(ctx.clone(), |msg: String| {
        tracing::info!(target: "word_script::print", "{}", msg);
    })?;
    globals.set("print", print_fn)?;

    Ok(())
}
