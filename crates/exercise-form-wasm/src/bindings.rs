//! 浏览器端绑定
//!
//! 包装 `ClassifierSession`，结果通过 serde-wasm-bindgen 转为 JS 对象，
//! 调试事件输出到 console。

use std::sync::Arc;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::confidence::ConfidenceParams;
use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink};
use crate::landmarks::LandmarkFrame;
use crate::presentation::{present, Feedback};
use crate::result::ClassificationResult;
use crate::session::{ClassifierConfig, ClassifierSession};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(message: &str);
}

struct ConsoleDiagnostics;

impl DiagnosticsSink for ConsoleDiagnostics {
    fn record(&self, event: &DiagnosticEvent) {
        log(&format!("[form] {event:?}"));
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    result: &'a ClassificationResult,
    feedback: Feedback,
}

/// 动作分类器
#[wasm_bindgen]
pub struct FormClassifier {
    session: ClassifierSession,
}

#[wasm_bindgen]
impl FormClassifier {
    #[wasm_bindgen(constructor)]
    pub fn new(confidence_threshold: Option<f64>) -> Self {
        let config = ClassifierConfig {
            confidence: confidence_threshold
                .map(ConfidenceParams::with_threshold)
                .unwrap_or_default(),
            ..ClassifierConfig::default()
        };
        Self {
            session: ClassifierSession::with_diagnostics(config, Arc::new(ConsoleDiagnostics)),
        }
    }

    /// 处理扁平关键点数组（stride 3 或 4），空数组表示无人
    ///
    /// 返回 `{ result, feedback }`
    pub fn process(&mut self, landmarks: &[f64], stride: usize, timestamp: Option<f64>) -> JsValue {
        let frame = LandmarkFrame::from_flat(landmarks, stride);
        self.run(frame.as_ref(), timestamp)
    }

    /// 直接处理 MediaPipe 的 `poseLandmarks`（对象数组或 null）
    #[wasm_bindgen(js_name = "processPoints")]
    pub fn process_points(&mut self, landmarks: JsValue, timestamp: Option<f64>) -> JsValue {
        let frame: Option<LandmarkFrame> =
            serde_wasm_bindgen::from_value(landmarks).unwrap_or_default();
        self.run(frame.as_ref(), timestamp)
    }

    fn run(&mut self, frame: Option<&LandmarkFrame>, timestamp: Option<f64>) -> JsValue {
        let now = timestamp
            .filter(|t| t.is_finite())
            .unwrap_or_else(js_sys::Date::now);
        let result = self.session.process_frame(frame, now);
        let output = FrameOutput {
            feedback: present(&result),
            result: &result,
        };
        serde_wasm_bindgen::to_value(&output).unwrap_or(JsValue::NULL)
    }

    /// 设置专注动作，返回实际生效的名称（无效时为 undefined）
    #[wasm_bindgen(js_name = "setFocus")]
    pub fn set_focus(&mut self, name: Option<String>) -> Option<String> {
        self.session
            .set_focus_name(name.as_deref())
            .map(|exercise| exercise.name().to_string())
    }

    #[wasm_bindgen(js_name = "getFocus")]
    pub fn focus(&self) -> Option<String> {
        self.session.focus().map(|exercise| exercise.name().to_string())
    }

    /// 处理键盘事件的 `key`，识别到命令时返回 true
    #[wasm_bindgen(js_name = "handleKey")]
    pub fn handle_key(&mut self, key: &str) -> bool {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.session.handle_key(c).is_some(),
            _ => false,
        }
    }

    #[wasm_bindgen(js_name = "setDebug")]
    pub fn set_debug(&mut self, enabled: bool) {
        self.session.set_debug(enabled);
    }

    #[wasm_bindgen(js_name = "isDebug")]
    pub fn is_debug(&self) -> bool {
        self.session.debug()
    }

    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.session.snapshot()).unwrap_or(JsValue::NULL)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
