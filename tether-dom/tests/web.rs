//! Browser integration tests (run with `wasm-pack test --headless`).

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use tether_core::AnchorProvider;
use tether_dom::{dom_config, DomAnchorProvider, FloatingElement};

wasm_bindgen_test_configure!(run_in_browser);

fn make_anchor() -> web_sys::Element {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document");
    let element = document.create_element("button").expect("create element");
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

#[wasm_bindgen_test]
fn provider_reads_a_nonzero_viewport() {
    let provider = DomAnchorProvider::new().expect("provider");
    let viewport = provider.viewport().expect("viewport");
    assert!(viewport.width > 0.0);
    assert!(viewport.height > 0.0);
}

#[wasm_bindgen_test]
fn detached_anchor_is_unmeasurable() {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("document");
    let detached = document.create_element("div").expect("create element");

    let provider = DomAnchorProvider::new().expect("provider");
    assert!(provider.measure(&detached).is_err());
}

#[wasm_bindgen_test]
fn floating_element_opens_hidden() {
    let anchor = make_anchor();
    let mut popover =
        FloatingElement::new(anchor, dom_config(), |_state| {}).expect("floating element");
    popover.open().expect("open");
    // The reveal gate stays down until the measure pass has run.
    assert!(!popover.is_positioned());
    popover.close();
    assert!(popover.state().position.is_none());
}
