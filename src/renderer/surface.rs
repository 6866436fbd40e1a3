//! 2D raster surface abstraction
//!
//! The renderer only talks to `Surface`. The browser backend is
//! `canvas::CanvasSurface`; `RecordingSurface` keeps the draw calls in memory
//! for the native runner and tests.

use glam::Vec2;

use super::palette::Rgba;

/// A gradient color stop, `offset` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Fill or stroke style
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint<'a> {
    Solid(Rgba),
    /// Gradient between two circles
    Radial {
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: &'a [ColorStop],
    },
    /// Gradient along a segment
    Linear {
        from: Vec2,
        to: Vec2,
        stops: &'a [ColorStop],
    },
}

impl<'a> Paint<'a> {
    /// Concentric radial gradient from `center` out to `radius`
    pub fn radial(center: Vec2, radius: f32, stops: &'a [ColorStop]) -> Self {
        Paint::Radial {
            inner: center,
            inner_radius: 0.0,
            outer: center,
            outer_radius: radius,
            stops,
        }
    }

    /// Largest alpha this paint can produce
    pub fn max_alpha(&self) -> f32 {
        match self {
            Paint::Solid(c) => c.a,
            Paint::Radial { stops, .. } | Paint::Linear { stops, .. } => {
                stops.iter().map(|s| s.color.a).fold(0.0, f32::max)
            }
        }
    }
}

/// Soft shadow drawn under a fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub blur: f32,
    pub color: Rgba,
}

/// Groups of draw calls, in back-to-front order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderLayer {
    Stars,
    ShootingStars,
    Orbits,
    Connections,
    Particles,
    Snow,
}

/// A 2D raster target
pub trait Surface {
    /// Size in px
    fn size(&self) -> Vec2;

    /// Resize the backing store; contents are discarded
    fn resize(&mut self, width: u32, height: u32);

    /// Erase everything
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, shadow: Option<Shadow>);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, paint: &Paint);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint);

    /// Marks the start of a layer's draw calls
    fn begin_layer(&mut self, _layer: RenderLayer) {}
}

/// Owned form of a `Paint`
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPaint {
    Solid(Rgba),
    Radial {
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        stops: Vec<ColorStop>,
    },
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
}

impl From<&Paint<'_>> for RecordedPaint {
    fn from(paint: &Paint<'_>) -> Self {
        match *paint {
            Paint::Solid(c) => RecordedPaint::Solid(c),
            Paint::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops,
            } => RecordedPaint::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                stops: stops.to_vec(),
            },
            Paint::Linear { from, to, stops } => RecordedPaint::Linear {
                from,
                to,
                stops: stops.to_vec(),
            },
        }
    }
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Layer(RenderLayer),
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: RecordedPaint,
        shadow: Option<Shadow>,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        paint: RecordedPaint,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        paint: RecordedPaint,
    },
}

impl DrawCommand {
    /// True for calls that put pixels on the surface
    pub fn is_draw(&self) -> bool {
        !matches!(self, DrawCommand::Clear | DrawCommand::Layer(_))
    }
}

/// In-memory surface that records draw calls since the last clear
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    clears: u64,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total clears over the surface lifetime
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Draw calls recorded under `layer`
    pub fn layer_commands(&self, layer: RenderLayer) -> Vec<&DrawCommand> {
        let mut current = None;
        self.commands
            .iter()
            .filter(|cmd| {
                if let DrawCommand::Layer(l) = cmd {
                    current = Some(*l);
                    return false;
                }
                current == Some(layer) && cmd.is_draw()
            })
            .collect()
    }

    /// Layers in the order they were started
    pub fn layer_order(&self) -> Vec<RenderLayer> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Layer(l) => Some(*l),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint, shadow: Option<Shadow>) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.into(),
            shadow,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            paint: paint.into(),
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: &Paint) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            paint: paint.into(),
        });
    }

    fn begin_layer(&mut self, layer: RenderLayer) {
        self.commands.push(DrawCommand::Layer(layer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clears_previous_frame() {
        let mut surface = RecordingSurface::new(100, 100);
        surface.clear();
        surface.fill_circle(Vec2::ZERO, 1.0, &Paint::Solid(Rgba::WHITE), None);
        surface.clear();
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
        assert_eq!(surface.clear_count(), 2);
    }

    #[test]
    fn test_layer_grouping() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.clear();
        surface.begin_layer(RenderLayer::Stars);
        surface.fill_circle(Vec2::ONE, 1.0, &Paint::Solid(Rgba::WHITE), None);
        surface.fill_circle(Vec2::ONE, 2.0, &Paint::Solid(Rgba::WHITE), None);
        surface.begin_layer(RenderLayer::Particles);
        surface.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, &Paint::Solid(Rgba::WHITE));

        assert_eq!(surface.layer_commands(RenderLayer::Stars).len(), 2);
        assert_eq!(surface.layer_commands(RenderLayer::Particles).len(), 1);
        assert!(surface.layer_commands(RenderLayer::Snow).is_empty());
        assert_eq!(
            surface.layer_order(),
            vec![RenderLayer::Stars, RenderLayer::Particles]
        );
    }

    #[test]
    fn test_paint_max_alpha() {
        let stops = [
            ColorStop::new(0.0, Rgba::WHITE.alpha(0.4)),
            ColorStop::new(1.0, Rgba::TRANSPARENT),
        ];
        assert_eq!(Paint::radial(Vec2::ZERO, 5.0, &stops).max_alpha(), 0.4);
        assert_eq!(Paint::Solid(Rgba::WHITE.alpha(0.3)).max_alpha(), 0.3);
    }
}
