//! Confetti renderer.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, HtmlElement};
use wordgate_core::{ConfettiConfig, ConfettiPlan, Particle};

use crate::error::WebError;

/// Append every particle of `plan` to the body and start its fall.
///
/// Each particle removes itself once its animation finishes.
pub fn render(
    document: &Document,
    plan: &ConfettiPlan,
    config: &ConfettiConfig,
) -> Result<(), WebError> {
    let body = document.body().ok_or_else(|| WebError::Missing { selector: "body".into() })?;

    for particle in &plan.particles {
        let element = spawn_particle(document, particle, config)?;
        body.append_child(&element)?;

        let frames = keyframes(particle)?;
        let animation = element.animate_with_f64(Some(&frames), particle.duration_ms);
        let remove = Closure::once_into_js(move || element.remove());
        animation.set_onfinish(Some(remove.unchecked_ref()));
    }

    Ok(())
}

fn spawn_particle(
    document: &Document,
    particle: &Particle,
    config: &ConfettiConfig,
) -> Result<HtmlElement, WebError> {
    let element = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::WrongType { selector: "div".into(), expected: "HtmlElement" })?;
    element.set_text_content(Some(&config.glyph));

    let style = element.style();
    style.set_property("position", "fixed")?;
    style.set_property("left", &format!("{}vw", particle.left_vw))?;
    style.set_property("top", &format!("{}px", config.start_top_px))?;
    style.set_property("font-size", &format!("{}px", particle.font_size_px))?;
    style.set_property("z-index", &config.z_index.to_string())?;
    style.set_property("pointer-events", "none")?;

    Ok(element)
}

/// Two keyframes: at the top and opaque, then one viewport lower and
/// transparent. The default easing of `animate` is linear.
fn keyframes(particle: &Particle) -> Result<Object, WebError> {
    let frames = Array::new();
    frames.push(&frame(Particle::start_transform(), 1.0)?.into());
    frames.push(&frame(&particle.end_transform(), 0.0)?.into());
    Ok(frames.into())
}

fn frame(transform: &str, opacity: f64) -> Result<Object, WebError> {
    let frame = Object::new();
    Reflect::set(&frame, &JsValue::from_str("transform"), &JsValue::from_str(transform))?;
    Reflect::set(&frame, &JsValue::from_str("opacity"), &JsValue::from_f64(opacity))?;
    Ok(frame)
}
