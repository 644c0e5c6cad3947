use bezier_timeline::{
    Anchor, DragSession, HandleKind, PartialVector, PathConfig, Timeline, TimelineConfig,
    ValueRange, Vector,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::Range;
use std::sync::Once;
use wasm_bindgen::prelude::*;

static INIT: Once = Once::new();

/// Install the panic hook and route `log` records to the browser console.
#[wasm_bindgen]
pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    });
}

fn js_error(error: impl Display) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

fn deserialize<T: DeserializeOwned>(value: JsValue, context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let message = format!("{}: {}", context, e);
        log::error!("{}", message);
        js_error(message)
    })
}

fn serialize<T: Serialize + ?Sized>(value: &T, context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let message = format!("{}: {}", context, e);
        log::error!("{}", message);
        js_error(message)
    })
}

fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

/// The `d(config?)` argument as a UI passes it, every field optional
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
struct PathOptions {
    zoom: PartialVector,
    offset: PartialVector,
    range: Option<Range<usize>>,
}

impl From<PathOptions> for PathConfig {
    fn from(options: PathOptions) -> Self {
        let config = PathConfig::from_partial(options.zoom, options.offset);
        match options.range {
            Some(range) => config.with_range(range),
            None => config,
        }
    }
}

/// A timeline and the drag gesture currently applied to it
#[wasm_bindgen(js_name = Timeline)]
pub struct JsTimeline {
    inner: Timeline,
    drag: Option<DragSession>,
}

#[wasm_bindgen(js_class = Timeline)]
impl JsTimeline {
    /// Create a timeline from an array of anchors and an optional config object
    #[wasm_bindgen(constructor)]
    pub fn new(anchors: JsValue, config: JsValue) -> Result<JsTimeline, JsValue> {
        let anchors: Vec<Anchor> = if is_missing(&anchors) {
            Vec::new()
        } else {
            deserialize(anchors, "invalid anchors")?
        };
        let config: TimelineConfig = if is_missing(&config) {
            TimelineConfig::default()
        } else {
            deserialize(config, "invalid timeline config")?
        };
        let inner = Timeline::with_anchors(anchors, config).map_err(js_error)?;
        Ok(JsTimeline { inner, drag: None })
    }

    /// The stored anchors
    #[wasm_bindgen(getter)]
    pub fn anchors(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.anchors(), "anchors")
    }

    /// Replace all anchors, ending any drag
    #[wasm_bindgen(js_name = setAnchors)]
    pub fn set_anchors(&mut self, anchors: JsValue) -> Result<(), JsValue> {
        let anchors: Vec<Anchor> = deserialize(anchors, "invalid anchors")?;
        self.inner.set_anchors(anchors).map_err(js_error)?;
        self.drag = None;
        Ok(())
    }

    /// Counter incremented by every mutation
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.inner.version() as f64
    }

    /// Anchors with their handles in world space
    #[wasm_bindgen(getter, js_name = absoluteAnchors)]
    pub fn absolute_anchors(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.absolute_anchors(), "absolute anchors")
    }

    /// Anchors with their handles clamped and unclamped
    #[wasm_bindgen(getter, js_name = clampedAnchors)]
    pub fn clamped_anchors(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.clamped_anchors(), "clamped anchors")
    }

    /// Segments with their lookup maps
    #[wasm_bindgen(getter)]
    pub fn segments(&self) -> Result<JsValue, JsValue> {
        serialize(self.inner.segments(), "segments")
    }

    /// The curve's value at `x`
    pub fn query(&self, x: f64) -> f64 {
        self.inner.query(x)
    }

    /// The curve's slope at `x`
    pub fn slope(&self, x: f64) -> f64 {
        self.inner.slope(x)
    }

    /// Svg path of the curve, `config` may hold `zoom`, `offset` and `range`
    pub fn d(&self, config: JsValue) -> Result<String, JsValue> {
        let options: PathOptions = if is_missing(&config) {
            PathOptions::default()
        } else {
            deserialize(config, "invalid path config")?
        };
        Ok(self.inner.d(&options.into()))
    }

    /// Insert an anchor, returns its index
    #[wasm_bindgen(js_name = addAnchor)]
    pub fn add_anchor(&mut self, x: f64, y: Option<f64>) -> Result<usize, JsValue> {
        let index = self.inner.add_anchor(x, y).map_err(js_error)?;
        self.drag = None;
        Ok(index)
    }

    /// Remove an anchor, returns it
    #[wasm_bindgen(js_name = deleteAnchor)]
    pub fn delete_anchor(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let anchor = self.inner.delete_anchor(index).map_err(js_error)?;
        self.drag = None;
        serialize(&anchor, "deleted anchor")
    }

    /// Position of the neighbour a `"pre"` or `"post"` handle is paired with
    #[wasm_bindgen(js_name = getPairedAnchorPosition)]
    pub fn paired_anchor_position(&self, kind: &str, index: usize) -> Result<JsValue, JsValue> {
        let kind: HandleKind = kind.parse().map_err(js_error)?;
        serialize(
            &self.inner.paired_anchor_position(kind, index),
            "paired anchor position",
        )
    }

    /// How far the curve overflows the viewport's `[min, max]`
    pub fn padding(&self, min: f64, max: f64) -> Result<JsValue, JsValue> {
        serialize(&self.inner.padding(ValueRange { min, max }), "padding")
    }

    /// Start dragging an anchor's position
    #[wasm_bindgen(js_name = startPositionDrag)]
    pub fn start_position_drag(&mut self, index: usize) -> Result<(), JsValue> {
        self.drag = Some(DragSession::position(&self.inner, index).map_err(js_error)?);
        Ok(())
    }

    /// Start dragging a `"pre"` or `"post"` handle
    #[wasm_bindgen(js_name = startHandleDrag)]
    pub fn start_handle_drag(&mut self, index: usize, kind: &str) -> Result<(), JsValue> {
        let kind: HandleKind = kind.parse().map_err(js_error)?;
        self.drag = Some(DragSession::handle(&self.inner, index, kind).map_err(js_error)?);
        Ok(())
    }

    /// Apply the total pointer movement since the drag started, already divided by the zoom
    pub fn drag(&mut self, dx: f64, dy: f64) -> Result<(), JsValue> {
        match &self.drag {
            Some(drag) => drag
                .update(&mut self.inner, Vector::new(dx, dy))
                .map_err(js_error),
            None => {
                log::warn!("drag update without a drag in progress");
                Ok(())
            }
        }
    }

    /// Finish the current drag
    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whether a drag is in progress, UIs hide hover previews meanwhile
    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_options() {
        let options = PathOptions {
            zoom: PartialVector {
                x: Some(2.0),
                y: None,
            },
            range: Some(0..2),
            ..PathOptions::default()
        };
        let config = PathConfig::from(options);
        assert_eq!(config.zoom, Vector::new(2.0, 1.0));
        assert_eq!(config.offset, Vector::ZERO);
        assert_eq!(config.range, Some(0..2));
    }
}
