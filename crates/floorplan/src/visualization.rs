pub mod colors;

use crate::{
    constants::{FONT_SIZE, MARGIN},
    error::{FloorplanError, Result},
    placement::{PlacedRoom, PlacementMethod},
    report::Bounds,
};

use ab_glyph::{FontVec, PxScale};
use colors::{Colors, LEGEND_ZONES, zone_color};
use font_kit::{family_name::FamilyName, properties::Properties, source::SystemSource};
use image::{ImageBuffer, Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut},
    rect::Rect,
};
use log::warn;
use std::path::Path;

const LEGEND_HEIGHT: f64 = 30.0;
const MAX_IMAGE_PX: f64 = 16384.0;

/// 平面座標(m, y上向き)から画素座標(y下向き)への変換
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanTransform {
    min_x: f64,
    max_y: f64,
    pixels_per_meter: f64,
}

impl PlanTransform {
    pub fn new(bounds: &Bounds, pixels_per_meter: f64) -> Self {
        Self {
            min_x: bounds.min_x,
            max_y: bounds.max_y,
            pixels_per_meter,
        }
    }

    #[inline]
    pub fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        let px_x = MARGIN + (x - self.min_x) * self.pixels_per_meter;
        let px_y = MARGIN + (self.max_y - y) * self.pixels_per_meter;
        (px_x, px_y)
    }

    #[inline]
    pub fn length(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }
}

/// 画像描画用のコンテキスト構造体
pub struct Renderer {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
    pub font: Option<FontVec>,
}

impl Renderer {
    /// 新しいレンダラーを作成（フォントがなければラベルなし）
    pub fn new(width: u32, height: u32) -> Self {
        let image = ImageBuffer::from_pixel(width, height, Colors::WHITE);

        let font = load_system_font();
        if font.is_none() {
            warn!("No system font found, labels will be skipped");
        }

        Self {
            image,
            width,
            height,
            font,
        }
    }

    fn px_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect::at(x as i32, y as i32).of_size((width as u32).max(1), (height as u32).max(1))
    }

    /// 矩形を描画（塗りつぶし）
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb<u8>) {
        draw_filled_rect_mut(&mut self.image, Self::px_rect(x, y, width, height), color);
    }

    /// 矩形の境界線を描画
    pub fn draw_rect_outline(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb<u8>) {
        draw_hollow_rect_mut(&mut self.image, Self::px_rect(x, y, width, height), color);
    }

    /// テキストを描画
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, font_size: f64, color: Rgb<u8>) {
        let Some(font) = &self.font else {
            return;
        };
        let scale = PxScale::from(font_size as f32);
        draw_text_mut(
            &mut self.image,
            color,
            x as i32,
            y as i32,
            scale,
            font,
            text,
        );
    }

    /// 画像を保存
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// システムフォントを読み込み
fn load_system_font() -> Option<FontVec> {
    let source = SystemSource::new();

    let font_families = vec![
        FamilyName::Title("Arial".to_string()),
        FamilyName::SansSerif,
        FamilyName::Title("Helvetica".to_string()),
        FamilyName::Title("DejaVu Sans".to_string()),
    ];

    for family in font_families {
        if let Ok(handle) = source.select_best_match(&[family], &Properties::new())
            && let Ok(font_kit_font) = handle.load()
            && let Some(font_bytes) = font_kit_font.copy_font_data()
            && let Ok(font) = FontVec::try_from_vec(font_bytes.to_vec())
        {
            return Some(font);
        }
    }
    None
}

/// 配置結果を PNG に描画
pub fn render_layout<P: AsRef<Path>>(
    rooms: &[PlacedRoom],
    output_path: P,
    pixels_per_meter: f64,
) -> Result<()> {
    if rooms.is_empty() {
        return Err(FloorplanError::Render("nothing to render".to_string()));
    }

    let bounds = Bounds::of(rooms);
    let transform = PlanTransform::new(&bounds, pixels_per_meter);

    let plan_w = transform.length(bounds.width()) + MARGIN * 2.0;
    let plan_h = transform.length(bounds.height()) + MARGIN * 2.0;
    if plan_w > MAX_IMAGE_PX || plan_h + LEGEND_HEIGHT > MAX_IMAGE_PX {
        return Err(FloorplanError::Render(format!(
            "image too large: {:.0} x {:.0} px",
            plan_w,
            plan_h + LEGEND_HEIGHT
        )));
    }

    let mut renderer = Renderer::new(plan_w as u32, (plan_h + LEGEND_HEIGHT) as u32);

    for room in rooms {
        render_room(&mut renderer, &transform, room);
    }
    render_legend(&mut renderer, plan_h);

    renderer.save(output_path)
}

fn render_room(renderer: &mut Renderer, transform: &PlanTransform, room: &PlacedRoom) {
    // 左上隅 = (x, y + height)
    let (px, py) = transform.to_px(room.x, room.y + room.height);
    let w = transform.length(room.width);
    let h = transform.length(room.height);

    renderer.draw_rect(px, py, w, h, zone_color(room.room_type.zone()));
    let outline = if room.method == PlacementMethod::Grid {
        Colors::RED
    } else {
        Colors::BLACK
    };
    renderer.draw_rect_outline(px, py, w, h, outline);

    renderer.draw_text(px + 4.0, py + 4.0, &room.name, FONT_SIZE, Colors::BLACK);
    let size = format!("{:.1} x {:.1} m", room.width, room.height);
    renderer.draw_text(
        px + 4.0,
        py + 6.0 + FONT_SIZE,
        &size,
        FONT_SIZE * 0.8,
        Colors::DARK_GRAY,
    );
}

fn render_legend(renderer: &mut Renderer, top: f64) {
    let swatch = 12.0;
    let mut x = MARGIN;
    for zone in LEGEND_ZONES {
        renderer.draw_rect(x, top, swatch, swatch, zone_color(zone));
        renderer.draw_rect_outline(x, top, swatch, swatch, Colors::BLACK);
        renderer.draw_text(x + swatch + 4.0, top - 1.0, &zone.to_string(), FONT_SIZE * 0.8, Colors::BLACK);
        x += 110.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::{RoomRequest, RoomType, Zone};
    use tempfile::TempDir;

    #[test]
    fn test_transform_flips_y() {
        let bounds = Bounds {
            min_x: -2.0,
            min_y: 0.0,
            max_x: 4.0,
            max_y: 3.0,
        };
        let t = PlanTransform::new(&bounds, 10.0);
        assert_eq!(t.to_px(-2.0, 3.0), (MARGIN, MARGIN));
        assert_eq!(t.to_px(4.0, 0.0), (MARGIN + 60.0, MARGIN + 30.0));
        assert_eq!(t.length(1.5), 15.0);
    }

    #[test]
    fn test_render_layout_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.png");
        let rooms = vec![PlacedRoom::from_request(
            &RoomRequest::new(RoomType::LivingRoom),
            0.0,
            0.0,
            PlacementMethod::Seed,
        )];

        render_layout(&rooms, &path, 20.0).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        // 5.0 x 4.5 m at 20 px/m plus margins and legend
        assert_eq!(img.width(), (100.0 + 2.0 * MARGIN) as u32);
        assert_eq!(img.height(), (90.0 + 2.0 * MARGIN + LEGEND_HEIGHT) as u32);
        // room center is filled with the public zone color
        let (cx, cy) = (MARGIN + 50.0, MARGIN + 45.0);
        assert_eq!(*img.get_pixel(cx as u32, cy as u32), zone_color(Zone::Public));
        // outside the plan stays white
        assert_eq!(*img.get_pixel(1, 1), Colors::WHITE);
    }

    #[test]
    fn test_render_rejects_empty_layout() {
        let temp_dir = TempDir::new().unwrap();
        let result = render_layout(&[], temp_dir.path().join("x.png"), 20.0);
        assert!(matches!(result, Err(FloorplanError::Render(_))));
    }
}
