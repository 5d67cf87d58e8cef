//! Zoom/pan transform and its animated transitions.

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 4.0;
/// Zoom factor of one zoom-in/zoom-out button press.
pub const ZOOM_STEP: f64 = 1.3;
/// Share of the viewport an auto-fitted graph occupies.
pub const FIT_FILL: f64 = 0.6;
/// Duration of button-driven transform animations, in seconds.
pub const TRANSITION_SECS: f64 = 0.75;

/// Axis-aligned box in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Right edge.
	pub max_x: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// Smallest box containing every circle `(x, y, radius)`.
	pub fn around(circles: impl IntoIterator<Item = (f64, f64, f64)>) -> Option<Self> {
		circles.into_iter().fold(None, |acc, (x, y, r)| {
			let b = Bounds {
				min_x: x - r,
				min_y: y - r,
				max_x: x + r,
				max_y: y + r,
			};
			Some(match acc {
				None => b,
				Some(a) => Bounds {
					min_x: a.min_x.min(b.min_x),
					min_y: a.min_y.min(b.min_y),
					max_x: a.max_x.max(b.max_x),
					max_y: a.max_y.max(b.max_y),
				},
			})
		})
	}

	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Midpoint.
	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}
}

/// Screen = graph * k + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal offset in screen pixels.
	pub x: f64,
	/// Vertical offset in screen pixels.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl ViewTransform {
	/// No zoom, no pan.
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	/// Map a screen point into graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Map a graph point onto the screen.
	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.k + self.x, gy * self.k + self.y)
	}

	/// Scale by `factor` within [`MIN_ZOOM`, `MAX_ZOOM`], keeping the graph
	/// point under the screen `anchor` in place.
	pub fn zoomed_about(self, factor: f64, anchor: (f64, f64)) -> Self {
		let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		Self {
			x: anchor.0 - (anchor.0 - self.x) * ratio,
			y: anchor.1 - (anchor.1 - self.y) * ratio,
			k,
		}
	}

	/// Linear interpolation; `t` in [0, 1].
	pub fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Transform that centers `bounds` in a `width` x `height` viewport and scales
/// it to [`FIT_FILL`] of the tighter dimension. A degenerate box is centered
/// at zoom 1.
pub fn fit_transform(bounds: Bounds, width: f64, height: f64) -> ViewTransform {
	let (bw, bh) = (bounds.width(), bounds.height());
	let k = if bw <= f64::EPSILON && bh <= f64::EPSILON {
		1.0
	} else {
		(FIT_FILL / (bw / width).max(bh / height)).clamp(MIN_ZOOM, MAX_ZOOM)
	};
	let (cx, cy) = bounds.center();
	ViewTransform {
		x: width / 2.0 - cx * k,
		y: height / 2.0 - cy * k,
		k,
	}
}

fn ease_cubic_in_out(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// An eased animation between two transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

impl Transition {
	/// Animate from `from` to `to` over [`TRANSITION_SECS`].
	pub fn new(from: ViewTransform, to: ViewTransform) -> Self {
		Self {
			from,
			to,
			elapsed: 0.0,
			duration: TRANSITION_SECS,
		}
	}

	/// Step by `dt` seconds and return the transform to display.
	pub fn advance(&mut self, dt: f64) -> ViewTransform {
		self.elapsed = (self.elapsed + dt).min(self.duration);
		if self.is_done() {
			return self.to;
		}
		self.from
			.lerp(self.to, ease_cubic_in_out(self.elapsed / self.duration))
	}

	/// Whether the target has been reached.
	pub fn is_done(&self) -> bool {
		self.elapsed >= self.duration
	}

	/// Final transform.
	pub fn target(&self) -> ViewTransform {
		self.to
	}
}
