use super::model::{Point, SegmentGeometry, WheelGeometry, WheelScene};
use super::{ARROW_LENGTH, ARROW_WIDTH, HUB_RADIUS, LABEL_FONT_SIZE, OUTLINE_WIDTH, POINTER_WIDTH};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::{FRAC_PI_2, PI};
use whirl::Label;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct SegmentRenderer<'a> {
    label: &'a Label,
    geometry: &'a SegmentGeometry,
    wheel: &'a WheelGeometry,
    fill: Srgba<f64>,
    font: &'a str,
}

impl<'a> SegmentRenderer<'a> {
    fn new(
        label: &'a Label,
        geometry: &'a SegmentGeometry,
        wheel: &'a WheelGeometry,
        fill: Srgba<f64>,
        font: &'a str,
    ) -> Self {
        Self {
            label,
            geometry,
            wheel,
            fill,
            font,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_slice(cr, colors)?;
        self.draw_text(cr, colors)
    }

    fn draw_slice(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.wheel.center;
        cr.move_to(center.x, center.y);
        cr.arc(
            center.x,
            center.y,
            self.wheel.radius,
            self.geometry.start,
            self.geometry.end,
        );
        cr.close_path();

        set_color(cr, self.fill);
        cr.fill_preserve()?;
        set_color(cr, colors.outline);
        cr.set_line_width(OUTLINE_WIDTH);
        cr.stroke()
    }

    fn draw_text(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_color(cr, colors.text);
        cr.select_font_face(self.font, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE * self.wheel.scale);
        if let Ok(ext) = cr.text_extents(self.label) {
            let at = self.geometry.label_at;
            cr.move_to(
                at.x - ext.width() / 2.0 - ext.x_bearing(),
                at.y + ext.height() / 2.0,
            );
            cr.show_text(self.label)?;
        }
        Ok(())
    }
}

pub fn draw(
    cr: &Context,
    scene: &WheelScene,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    let wheel = WheelGeometry::fit(width as f64, height as f64);
    let segments = scene.segments(&wheel);
    let count = segments.len();

    for (i, (label, geometry)) in scene.labels.iter().zip(&segments).enumerate() {
        SegmentRenderer::new(label, geometry, &wheel, colors.segment(i, count), &scene.font)
            .draw(cr, colors)?;
    }

    draw_pointer(cr, scene, &wheel, colors)?;
    draw_hub(cr, &wheel, colors)
}

fn draw_pointer(
    cr: &Context,
    scene: &WheelScene,
    wheel: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let tip = wheel.pointer_tip(scene.anchor, scene.pointer);
    let direction = (tip.y - wheel.center.y).atan2(tip.x - wheel.center.x);
    let arrow_len = ARROW_LENGTH * wheel.scale;
    let base = tip.polar(arrow_len, direction + PI);

    set_color(cr, colors.pointer);

    // shaft stops at the arrowhead so the tip stays sharp
    cr.set_line_width(POINTER_WIDTH * wheel.scale);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.move_to(wheel.center.x, wheel.center.y);
    cr.line_to(base.x, base.y);
    cr.stroke()?;

    let half = ARROW_WIDTH * wheel.scale / 2.0;
    let left: Point = base.polar(half, direction - FRAC_PI_2);
    let right: Point = base.polar(half, direction + FRAC_PI_2);
    cr.move_to(tip.x, tip.y);
    cr.line_to(left.x, left.y);
    cr.line_to(right.x, right.y);
    cr.close_path();
    cr.fill()
}

fn draw_hub(
    cr: &Context,
    wheel: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.hub);
    cr.arc(
        wheel.center.x,
        wheel.center.y,
        HUB_RADIUS * wheel.scale,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}
