// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for drawer shapes and label frames.

use std::fmt::Write as _;

use kurbo::{Rect, Shape as _};
use peniko::Brush;
use strata_drawers::{Shape, ShapeManager};
use strata_labels::LabelFrame;

const MARGIN: f64 = 10.0;

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    body: String,
    bounds: Option<Rect>,
}

impl SvgScene {
    /// Appends every shape of `shapes` in render order.
    pub(crate) fn push_shapes(&mut self, shapes: &ShapeManager) {
        for shape in shapes.render_order() {
            self.push_shape(shape);
        }
    }

    fn push_shape(&mut self, shape: &Shape) {
        if shape.is_empty() {
            return;
        }
        let style = shape.style();
        let _ = write!(self.body, r#"<path d="{}""#, shape.path().to_svg());
        match &style.fill {
            Some(fill) => write_paint_attr(&mut self.body, "fill", fill),
            None => self.body.push_str(r#" fill="none""#),
        }
        if let Some(stroke) = &style.stroke {
            write_paint_attr(&mut self.body, "stroke", &stroke.brush);
            let _ = write!(self.body, r#" stroke-width="{}""#, stroke.width);
        }
        self.body.push_str("/>\n");
        self.grow(shape.path().bounding_box());
    }

    /// Appends drawn labels, lowest z-index first.
    pub(crate) fn push_labels(&mut self, frames: &[&LabelFrame]) {
        for frame in frames {
            self.push_label(frame);
        }
    }

    fn push_label(&mut self, frame: &LabelFrame) {
        let g = &frame.geometry;
        if let Some(connector) = &frame.connector {
            let l = connector.line;
            let _ = write!(
                self.body,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                l.p0.x, l.p0.y, l.p1.x, l.p1.y
            );
            write_paint_attr(&mut self.body, "stroke", &connector.stroke.brush);
            let _ = write!(self.body, r#" stroke-width="{}"/>"#, connector.stroke.width);
            self.body.push('\n');
        }

        self.body.push_str("<g");
        if g.rotation != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({} {} {})""#,
                g.rotation, g.pivot.x, g.pivot.y
            );
        }
        self.body.push_str(">\n");

        if let Some(bg) = &frame.background {
            let b = g.bounds;
            let _ = write!(
                self.body,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}""#,
                b.x0,
                b.y0,
                b.width(),
                b.height(),
                bg.corner_radius
            );
            match &bg.fill {
                Some(fill) => write_paint_attr(&mut self.body, "fill", fill),
                None => self.body.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = &bg.stroke {
                write_paint_attr(&mut self.body, "stroke", &stroke.brush);
                let _ = write!(self.body, r#" stroke-width="{}""#, stroke.width);
            }
            self.body.push_str("/>\n");
        }

        let style = &g.style;
        let line_height = style.font_size * style.line_spacing;
        for (i, line) in frame.text.lines().enumerate() {
            #[expect(clippy::cast_precision_loss, reason = "line counts are small")]
            let y = g.text_rect.y0 + g.baseline + line_height * i as f64;
            let _ = write!(
                self.body,
                r#"<text x="{}" y="{}" font-size="{}" font-family="{}" font-weight="{}""#,
                g.text_rect.x0,
                y,
                style.font_size,
                style.font_family.as_css_family(),
                style.font_weight.0
            );
            write_paint_attr(&mut self.body, "fill", &frame.font);
            self.body.push('>');
            self.body.push_str(&escape_xml(line));
            self.body.push_str("</text>\n");
        }
        self.body.push_str("</g>\n");
        self.grow(g.rotated_bounds());
    }

    fn grow(&mut self, b: Rect) {
        if !b.is_finite() {
            return;
        }
        self.bounds = Some(match self.bounds {
            None => b,
            Some(r) => r.union(b),
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .bounds
            .map(|r| r.inflate(MARGIN, MARGIN))
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
