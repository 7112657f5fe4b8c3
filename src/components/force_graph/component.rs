use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::{GraphView, ViewportCommand, ViewportOp};

const FRAME_SECS: f32 = 0.016;
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Cancels the pending animation frame and detaches the resize listener.
/// Dropping the closures also breaks the animation loop's self-reference.
fn teardown(animate: &FrameCallback, resize_cb: &FrameCallback, frame: &Cell<Option<i32>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(id) = frame.take() {
		let _ = window.cancel_animation_frame(id);
	}
	if let Some(cb) = resize_cb.borrow_mut().take() {
		let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
	}
	animate.borrow_mut().take();
	debug!("Canvas unmounted, animation loop and resize listener removed");
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or(FALLBACK_SIZE)
}

fn local_coords(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed canvas for a [`GraphView`].
///
/// The simulation is rebuilt whenever `data` changes; nodes that keep their
/// id keep their position. Viewport operations arrive through `commands`.
/// Dropping a dragged node reports its id and graph-space position to
/// `on_node_moved`.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphView>,
	#[prop(optional, into)] commands: Option<Signal<ViewportCommand>>,
	#[prop(optional)] on_node_moved: Option<Callback<(String, (f64, f64))>>,
	#[prop(default = false)] arrows: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let frame: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	// The mount effect is disposed before cleanups run; keep our own handles.
	let handles = SendWrapper::new((animate.clone(), resize_cb.clone(), frame.clone()));
	on_cleanup(move || {
		let (animate, resize_cb, frame) = handles.take();
		teardown(&animate, &resize_cb, &frame);
	});

	let (state_init, animate_init, resize_init, frame_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), frame.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("2d canvas context unavailable");
			return;
		};
		*state_init.borrow_mut() = Some(ForceGraphState::new(&data.get_untracked(), w, h, arrows));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, frame_anim) =
			(state_init.clone(), animate_init.clone(), frame_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_SECS);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				frame_anim.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			frame_init.set(window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let view = data.get();
		if let Some(ref mut s) = *state_data.borrow_mut() {
			debug!("Canvas data: {} nodes, {} edges", view.nodes.len(), view.edges.len());
			s.set_data(&view);
		}
	});

	let state_cmd = state.clone();
	let last_seq = Rc::new(Cell::new(commands.map_or(0, |c| c.get_untracked().seq)));
	Effect::new(move |_| {
		let Some(commands) = commands else {
			return;
		};
		let cmd = commands.get();
		if cmd.seq <= last_seq.get() {
			return;
		}
		last_seq.set(cmd.seq);
		let Some(op) = cmd.op else {
			return;
		};
		if let Some(ref mut s) = *state_cmd.borrow_mut() {
			match op {
				ViewportOp::ZoomIn => s.viewport.zoom_in(),
				ViewportOp::ZoomOut => s.viewport.zoom_out(),
				ViewportOp::Fit => s.viewport.request_fit(),
			}
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let dropped = state_mu.borrow_mut().as_mut().and_then(|s| s.release());
		if let Some((id, (x, y))) = dropped {
			info!("Node {id} dragged to ({x:.1}, {y:.1})");
			if let Some(cb) = on_node_moved {
				cb.run((id, (x, y)));
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_coords(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.viewport.wheel(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	#[wasm_bindgen_test]
	fn teardown_detaches_resize_listener() {
		let window = web_sys::window().unwrap();
		let calls = Rc::new(Cell::new(0));
		let animate: FrameCallback = Rc::new(RefCell::new(Some(Closure::new(|| {}))));
		let resize_cb: FrameCallback = Rc::new(RefCell::new(None));

		let counter = calls.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || counter.set(counter.get() + 1)));
		if let Some(ref cb) = *resize_cb.borrow() {
			window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				.unwrap();
		}
		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(calls.get(), 1);

		let frame = Cell::new(
			animate
				.borrow()
				.as_ref()
				.and_then(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()),
		);
		teardown(&animate, &resize_cb, &frame);

		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
		assert_eq!(calls.get(), 1);
		assert!(resize_cb.borrow().is_none());
		assert!(animate.borrow().is_none());
		assert_eq!(frame.get(), None);
	}
}
