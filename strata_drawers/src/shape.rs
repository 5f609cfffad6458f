// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape groups: the named path outputs a drawer writes into.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;

/// Logical name of one path output of a shape group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeRole {
    /// The filled body of the point.
    Path,
    /// A hatch pattern over the body, same geometry.
    HatchFill,
    /// An unfilled outline (line series).
    Stroke,
}

impl ShapeRole {
    /// Paint order within a series; higher draws later.
    pub const fn z_index(self) -> i32 {
        match self {
            Self::Path => 0,
            Self::HatchFill => 1,
            Self::Stroke => 10,
        }
    }

    /// Theme name of the role.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::HatchFill => "hatchFill",
            Self::Stroke => "stroke",
        }
    }
}

/// A stroke paint.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in pixels.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Paint applied to a shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    /// Fill paint; `None` leaves the path unfilled.
    pub fill: Option<Brush>,
    /// Outline; `None` leaves the path unstroked.
    pub stroke: Option<StrokeStyle>,
}

impl ShapeStyle {
    /// A fill-only style.
    pub fn filled(fill: impl Into<Brush>) -> Self {
        Self {
            fill: Some(fill.into()),
            stroke: None,
        }
    }

    /// A stroke-only style.
    pub fn stroked(stroke: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Adds an outline.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }
}

/// One path output.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    role: ShapeRole,
    path: BezPath,
    style: ShapeStyle,
}

impl Shape {
    /// Creates an empty shape.
    pub fn new(role: ShapeRole, style: ShapeStyle) -> Self {
        Self {
            role,
            path: BezPath::new(),
            style,
        }
    }

    /// The role of this shape in its group.
    pub fn role(&self) -> ShapeRole {
        self.role
    }

    /// The accumulated path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// The shape's paint.
    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    /// Stroke width, `0` when unstroked.
    pub fn stroke_thickness(&self) -> f64 {
        self.style.stroke.as_ref().map_or(0.0, |s| s.width)
    }

    /// Starts a new subpath.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.path.move_to(p);
    }

    /// Adds a straight segment.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.path.line_to(p);
    }

    /// Adds a cubic segment.
    pub fn curve_to(&mut self, c1: impl Into<Point>, c2: impl Into<Point>, p: impl Into<Point>) {
        self.path.curve_to(c1.into(), c2.into(), p.into());
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        self.path.close_path();
    }

    /// Drops every path element.
    pub fn clear(&mut self) {
        self.path.truncate(0);
    }

    /// Returns `true` if no path element was emitted.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }
}

/// Visual state a shape group renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointState {
    /// Idle.
    #[default]
    Normal,
    /// Under the pointer.
    Hover,
    /// Selected.
    Selected,
}

/// Identity of a shape group, stable until the manager is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeGroupId(pub u64);

/// The shapes that render one point (or one continuous run) in one state.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeGroup {
    id: ShapeGroupId,
    state: PointState,
    shapes: SmallVec<[Shape; 3]>,
}

impl ShapeGroup {
    /// The group's id.
    pub fn id(&self) -> ShapeGroupId {
        self.id
    }

    /// The state the group renders.
    pub fn state(&self) -> PointState {
        self.state
    }

    /// The shape with `role`, if the group has one.
    pub fn get(&self, role: ShapeRole) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.role == role)
    }

    /// Mutable shape with `role`.
    pub fn get_mut(&mut self, role: ShapeRole) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.role == role)
    }

    /// All shapes of the group.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Clears every shape's path.
    pub fn clear(&mut self) {
        for s in &mut self.shapes {
            s.clear();
        }
    }

    /// Returns `true` if no shape has path elements.
    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(Shape::is_empty)
    }
}

/// Allocates shape groups for a series.
///
/// The manager is configured with the roles a drawer requires and a paint per
/// role; every new group gets one empty shape per required role.
#[derive(Clone, Debug)]
pub struct ShapeManager {
    styles: SmallVec<[(ShapeRole, ShapeStyle); 3]>,
    required: SmallVec<[ShapeRole; 3]>,
    groups: Vec<ShapeGroup>,
    next_id: u64,
}

impl Default for ShapeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeManager {
    /// Creates a manager with no required roles.
    pub fn new() -> Self {
        Self {
            styles: SmallVec::new(),
            required: SmallVec::new(),
            groups: Vec::new(),
            next_id: 0,
        }
    }

    /// Sets the paint used for shapes with `role`.
    #[must_use]
    pub fn with_style(mut self, role: ShapeRole, style: ShapeStyle) -> Self {
        self.set_style(role, style);
        self
    }

    /// Sets the paint used for shapes with `role` in groups created from now on.
    pub fn set_style(&mut self, role: ShapeRole, style: ShapeStyle) {
        match self.styles.iter_mut().find(|(r, _)| *r == role) {
            Some((_, s)) => *s = style,
            None => self.styles.push((role, style)),
        }
    }

    /// The paint for `role`.
    pub fn style(&self, role: ShapeRole) -> ShapeStyle {
        self.styles
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, s)| s.clone())
            .unwrap_or_default()
    }

    /// Sets the roles every new group carries.
    pub fn configure(&mut self, required: &[ShapeRole]) {
        self.required = required.iter().copied().collect();
    }

    /// The roles every new group carries.
    pub fn required(&self) -> &[ShapeRole] {
        &self.required
    }

    /// Allocates a group for `state`.
    pub fn add_group(&mut self, state: PointState) -> ShapeGroupId {
        let id = ShapeGroupId(self.next_id);
        self.next_id += 1;
        let shapes = self
            .required
            .iter()
            .map(|&role| Shape::new(role, self.style(role)))
            .collect();
        self.groups.push(ShapeGroup { id, state, shapes });
        id
    }

    /// Looks up a group.
    pub fn group(&self, id: ShapeGroupId) -> Option<&ShapeGroup> {
        let i = self.groups.binary_search_by_key(&id, |g| g.id).ok()?;
        Some(&self.groups[i])
    }

    /// Looks up a group mutably.
    pub fn group_mut(&mut self, id: ShapeGroupId) -> Option<&mut ShapeGroup> {
        let i = self.groups.binary_search_by_key(&id, |g| g.id).ok()?;
        Some(&mut self.groups[i])
    }

    /// Groups in allocation order.
    pub fn groups(&self) -> &[ShapeGroup] {
        &self.groups
    }

    /// Drops every group. Ids are not reused, so stale handles resolve to `None`.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Non-empty shapes in paint order (by role, then allocation order).
    pub fn render_order(&self) -> Vec<&Shape> {
        let mut out: Vec<&Shape> = self
            .groups
            .iter()
            .flat_map(|g| g.shapes.iter())
            .filter(|s| !s.is_empty())
            .collect();
        out.sort_by_key(|s| s.role.z_index());
        out
    }
}
