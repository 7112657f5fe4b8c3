//! Pan / zoom bookkeeping for the canvas, independent of the DOM.

pub const ZOOM_IN_FACTOR: f64 = 1.2;
pub const ZOOM_OUT_FACTOR: f64 = 0.8;
pub const WHEEL_IN_FACTOR: f64 = 1.1;
pub const WHEEL_OUT_FACTOR: f64 = 0.9;
pub const ZOOM_ANIMATION_SECS: f64 = 0.2;
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
pub const FIT_PADDING: f64 = 30.0;

/// Screen position of the graph origin (`x`, `y`) and the scale `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Rescales while keeping the graph point under `(sx, sy)` in place.
	pub fn zoom_about(&mut self, sx: f64, sy: f64, k: f64) {
		let ratio = k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = k;
	}
}

/// Axis-aligned box around a set of graph-space points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			})
		})
	}

	/// Grows the box by `margin` on every side.
	pub fn inflate(self, margin: f64) -> Self {
		Bounds {
			min_x: self.min_x - margin,
			min_y: self.min_y - margin,
			max_x: self.max_x + margin,
			max_y: self.max_y + margin,
		}
	}

	pub fn center(&self) -> (f64, f64) {
		((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
	}
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ZoomAnimation {
	from: f64,
	to: f64,
	elapsed: f64,
}

impl ZoomAnimation {
	fn current(&self) -> f64 {
		if self.finished() {
			return self.to;
		}
		let t = self.elapsed / ZOOM_ANIMATION_SECS;
		self.from + (self.to - self.from) * ease_out_cubic(t)
	}

	fn finished(&self) -> bool {
		self.elapsed >= ZOOM_ANIMATION_SECS
	}
}

/// Canvas viewport: the current transform plus any zoom animation or fit
/// that is waiting for the next frame.
#[derive(Clone, Debug)]
pub struct Viewport {
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
	animation: Option<ZoomAnimation>,
	pending_fit: bool,
}

impl Viewport {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			width,
			height,
			animation: None,
			pending_fit: true,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Zoom level the view is heading to, which differs from the current
	/// scale while an animation runs.
	pub fn target_zoom(&self) -> f64 {
		self.animation.map_or(self.transform.k, |a| a.to)
	}

	pub fn is_animating(&self) -> bool {
		self.animation.is_some()
	}

	pub fn zoom_in(&mut self) {
		self.animate_zoom(self.target_zoom() * ZOOM_IN_FACTOR);
	}

	pub fn zoom_out(&mut self) {
		self.animate_zoom(self.target_zoom() * ZOOM_OUT_FACTOR);
	}

	fn animate_zoom(&mut self, to: f64) {
		self.animation = Some(ZoomAnimation {
			from: self.transform.k,
			to: to.clamp(MIN_ZOOM, MAX_ZOOM),
			elapsed: 0.0,
		});
	}

	/// Immediate zoom about the cursor; cancels a running animation.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.animation = None;
		let factor = if delta_y > 0.0 {
			WHEEL_OUT_FACTOR
		} else {
			WHEEL_IN_FACTOR
		};
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		self.transform.zoom_about(sx, sy, k);
	}

	/// Asks for fit + center on the next frame.
	pub fn request_fit(&mut self) {
		self.pending_fit = true;
	}

	pub fn take_pending_fit(&mut self) -> bool {
		std::mem::take(&mut self.pending_fit)
	}

	/// Scales `bounds` (plus padding) to the viewport and centers it.
	pub fn fit(&mut self, bounds: Bounds, node_radius: f64) {
		self.animation = None;
		let b = bounds.inflate(node_radius);
		let (bw, bh) = (b.max_x - b.min_x, b.max_y - b.min_y);
		let (aw, ah) = (
			(self.width - 2.0 * FIT_PADDING).max(1.0),
			(self.height - 2.0 * FIT_PADDING).max(1.0),
		);
		let k = if bw <= f64::EPSILON || bh <= f64::EPSILON {
			1.0
		} else {
			(aw / bw).min(ah / bh)
		}
		.clamp(MIN_ZOOM, MAX_ZOOM);
		self.transform.k = k;
		self.center(b);
	}

	/// Moves the view so the middle of `bounds` sits in the middle of the
	/// canvas, keeping the scale.
	pub fn center(&mut self, bounds: Bounds) {
		let (cx, cy) = bounds.center();
		self.transform.x = self.width / 2.0 - cx * self.transform.k;
		self.transform.y = self.height / 2.0 - cy * self.transform.k;
	}

	/// Advances a running zoom animation, zooming about the canvas center.
	pub fn tick(&mut self, dt: f64) {
		let Some(mut anim) = self.animation else {
			return;
		};
		anim.elapsed += dt;
		let k = anim.current();
		self.transform.zoom_about(self.width / 2.0, self.height / 2.0, k);
		self.animation = if anim.finished() { None } else { Some(anim) };
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settle(v: &mut Viewport) {
		for _ in 0..100 {
			v.tick(0.016);
		}
	}

	#[test]
	fn zoom_in_then_out_compounds() {
		let mut v = Viewport::new(800.0, 600.0);
		v.zoom_in();
		settle(&mut v);
		assert!((v.transform.k - 1.2).abs() < 1e-9);
		v.zoom_out();
		settle(&mut v);
		assert!((v.transform.k - 0.96).abs() < 1e-9);
		assert!(!v.is_animating());
	}

	#[test]
	fn zoom_animation_lasts_200ms() {
		let mut v = Viewport::new(800.0, 600.0);
		v.zoom_in();
		v.tick(0.1);
		assert!(v.is_animating());
		assert!(v.transform.k > 1.0 && v.transform.k < 1.2);
		v.tick(0.1);
		assert!(!v.is_animating());
		assert!((v.transform.k - 1.2).abs() < 1e-9);
	}

	#[test]
	fn rapid_clicks_compound_on_target() {
		let mut v = Viewport::new(800.0, 600.0);
		v.zoom_in();
		v.tick(0.05);
		v.zoom_in();
		settle(&mut v);
		assert!((v.transform.k - 1.44).abs() < 1e-9);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut v = Viewport::new(800.0, 600.0);
		for _ in 0..50 {
			v.zoom_out();
		}
		settle(&mut v);
		assert_eq!(v.transform.k, MIN_ZOOM);
	}

	#[test]
	fn zoom_about_keeps_anchor_fixed() {
		let mut t = ViewTransform {
			x: 10.0,
			y: 20.0,
			k: 1.0,
		};
		let before = t.screen_to_graph(300.0, 200.0);
		t.zoom_about(300.0, 200.0, 2.5);
		let after = t.screen_to_graph(300.0, 200.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn fit_places_bounds_inside_padding() {
		let mut v = Viewport::new(800.0, 600.0);
		let bounds = Bounds::from_points([(-500.0, -100.0), (500.0, 100.0)]).unwrap();
		v.fit(bounds, 0.0);

		let (left, top) = v.transform.graph_to_screen(-500.0, -100.0);
		let (right, bottom) = v.transform.graph_to_screen(500.0, 100.0);
		assert!((left - FIT_PADDING).abs() < 1e-9);
		assert!((right - (800.0 - FIT_PADDING)).abs() < 1e-9);
		assert!(top > FIT_PADDING && bottom < 600.0 - FIT_PADDING);
		assert!(((top + bottom) / 2.0 - 300.0).abs() < 1e-9);
	}

	#[test]
	fn single_point_fit_centers_at_unit_scale() {
		let mut v = Viewport::new(400.0, 400.0);
		v.fit(Bounds::from_points([(50.0, 50.0)]).unwrap(), 0.0);
		assert_eq!(v.transform.k, 1.0);
		assert_eq!(v.transform.graph_to_screen(50.0, 50.0), (200.0, 200.0));
	}

	#[test]
	fn fit_is_pending_once() {
		let mut v = Viewport::new(100.0, 100.0);
		assert!(v.take_pending_fit());
		assert!(!v.take_pending_fit());
		v.request_fit();
		assert!(v.take_pending_fit());
	}

	#[test]
	fn empty_bounds() {
		assert_eq!(Bounds::from_points(std::iter::empty()), None);
	}
}
