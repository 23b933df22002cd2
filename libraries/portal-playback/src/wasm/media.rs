//! `MediaHandle` over a browser audio element

use crate::error::ResourceErrorKind;
use crate::media::MediaHandle;
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

/// One audio element per controller
pub struct AudioElementMedia {
    element: HtmlAudioElement,
}

impl AudioElementMedia {
    /// Create a detached audio element
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            element: HtmlAudioElement::new()?,
        })
    }

    /// Wrap an element that already lives in the page
    pub fn from_element(element: HtmlAudioElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }
}

impl MediaHandle for AudioElementMedia {
    fn load(&mut self, source: &str) {
        self.element.set_src(source);
        self.element.load();
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        let d = self.element.duration();
        d.is_finite().then_some(d)
    }

    fn set_volume(&mut self, gain: f32) {
        self.element.set_volume(f64::from(gain));
    }

    fn play(&mut self) -> std::result::Result<(), ResourceErrorKind> {
        // Asynchronous rejections arrive later through `onPlayRejected`
        self.element.play().map(|_| ()).map_err(|e| {
            ResourceErrorKind::PlayRejected(e.as_string().unwrap_or_else(|| "play() threw".to_string()))
        })
    }

    fn pause(&mut self) {
        self.element.pause().ok();
    }
}
