//! `Word` JavaScript class
//!
//! Script-side handle around a [`FixedBuffer`]. QuickJS allocates and frees
//! the handle; the buffer lives inline, so there is nothing extra to release.
//!
//! View windows come from the engine's internal slots (TypedArrays) or the
//! intrinsic prototype accessors (DataView and other views), never from
//! properties a script can shadow on the instance.

use rquickjs::class::Trace;
use rquickjs::function::This;
use rquickjs::{ArrayBuffer, Ctx, Exception, FromJs, Function, Object, Result, TypedArray, Value};
use word_core::{FixedBuffer, WordError, CAPACITY};

#[derive(Trace)]
#[rquickjs::class]
pub struct Word {
    #[qjs(skip_trace)]
    buffer: FixedBuffer,
}

#[rquickjs::methods]
impl Word {
    #[qjs(constructor)]
    pub fn new() -> Self {
        Self {
            buffer: FixedBuffer::new(),
        }
    }

    /// Copy a bytes-like source in, truncated to 64 bytes.
    #[qjs(rename = "setBytes")]
    pub fn set_bytes<'js>(&mut self, ctx: Ctx<'js>, source: Value<'js>) -> Result<()> {
        let buffer = &mut self.buffer;
        with_source_bytes(&ctx, &source, |bytes| buffer.set(bytes))
    }

    /// Fresh `Uint8Array` holding the bytes in use.
    #[qjs(rename = "getBytes")]
    pub fn get_bytes<'js>(&self, ctx: Ctx<'js>) -> Result<TypedArray<'js, u8>> {
        TypedArray::new(ctx, self.buffer.get())
    }

    #[qjs(get)]
    pub fn length(&self) -> u32 {
        self.buffer.len() as u32
    }

    #[qjs(static)]
    pub fn capacity() -> u32 {
        CAPACITY as u32
    }
}

impl Word {
    /// Rust-side view of the wrapped buffer.
    pub fn buffer(&self) -> &FixedBuffer {
        &self.buffer
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `f` over the bytes `source` exposes, or throw `TypeError`.
fn with_source_bytes<'js, R>(
    ctx: &Ctx<'js>,
    source: &Value<'js>,
    f: impl FnOnce(&[u8]) -> R,
) -> Result<R> {
    let object = match source.as_object() {
        Some(object) => object,
        None => return Err(reject(ctx, source.type_name())),
    };

    // Detached buffers are not recognized here and fall through to the
    // rejection below.
    if let Some(array_buffer) = ArrayBuffer::from_object(object.clone()) {
        let bytes = array_buffer
            .as_bytes()
            .ok_or_else(|| reject(ctx, "detached ArrayBuffer"))?;
        return Ok(f(bytes));
    }

    macro_rules! typed_arrays {
        ($($item:ty),*) => {$(
            if let Ok(array) = TypedArray::<$item>::from_object(object.clone()) {
                let bytes = array
                    .as_bytes()
                    .ok_or_else(|| reject(ctx, "detached typed array"))?;
                return Ok(f(bytes));
            }
        )*};
    }
    typed_arrays!(u8, i8, u16, i16, u32, i32, f32, f64, u64, i64);

    // DataView and Uint8ClampedArray.
    let array_buffer_ctor: Object = ctx.globals().get("ArrayBuffer")?;
    let is_view: Function = array_buffer_ctor.get("isView")?;
    if !is_view.call::<_, bool>((source.clone(),))? {
        return Err(reject(ctx, source.type_name()));
    }

    let prototype = view_prototype(ctx, object)?;
    let backing: Object = intrinsic_get(ctx, &prototype, object, "buffer")?;
    let offset = byte_index(ctx, intrinsic_get(ctx, &prototype, object, "byteOffset")?)?;
    let len = byte_index(ctx, intrinsic_get(ctx, &prototype, object, "byteLength")?)?;
    let end = offset
        .checked_add(len)
        .ok_or_else(|| reject(ctx, "view with invalid byte window"))?;

    let array_buffer =
        ArrayBuffer::from_object(backing).ok_or_else(|| reject(ctx, "detached ArrayBuffer"))?;
    let bytes = array_buffer
        .as_bytes()
        .ok_or_else(|| reject(ctx, "detached ArrayBuffer"))?;
    let window = bytes
        .get(offset..end)
        .ok_or_else(|| reject(ctx, "out-of-bounds view"))?;
    Ok(f(window))
}

/// `DataView.prototype` for DataViews, `%TypedArray%.prototype` otherwise.
fn view_prototype<'js>(ctx: &Ctx<'js>, view: &Object<'js>) -> Result<Object<'js>> {
    let globals = ctx.globals();
    let data_view: Function = globals.get("DataView")?;
    if view.is_instance_of(&data_view) {
        return data_view.get("prototype");
    }
    let typed_array_ctor: Object = globals.get("Uint8Array")?;
    let typed_array_prototype: Object = typed_array_ctor.get("prototype")?;
    typed_array_prototype
        .get_prototype()
        .ok_or_else(|| reject(ctx, "view without prototype"))
}

/// Call the accessor defined on `prototype` with `view` as receiver.
/// Intrinsic accessors read internal slots and throw on a foreign receiver.
fn intrinsic_get<'js, V: FromJs<'js>>(
    ctx: &Ctx<'js>,
    prototype: &Object<'js>,
    view: &Object<'js>,
    name: &str,
) -> Result<V> {
    let object_ctor: Object = ctx.globals().get("Object")?;
    let describe: Function = object_ctor.get("getOwnPropertyDescriptor")?;
    let descriptor: Object = describe.call((prototype.clone(), name))?;
    let getter: Function = descriptor.get("get")?;
    getter.call((This(view.clone()),))
}

fn byte_index(ctx: &Ctx<'_>, value: f64) -> Result<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= usize::MAX as f64 {
        return Err(reject(ctx, "view with invalid byte window"));
    }
    Ok(value as usize)
}

fn reject(ctx: &Ctx<'_>, found: &str) -> rquickjs::Error {
    let err = WordError::invalid_input(found);
    tracing::debug!(%err, "rejected setBytes source");
    Exception::throw_type(ctx, &err.to_string())
}
