use crate::rooms::Zone;

use image::Rgb;

/// 色定義
pub struct Colors;

impl Colors {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const DARK_GRAY: Rgb<u8> = Rgb([128, 128, 128]);
    pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
    // ゾーンの色（薄い色で塗りつぶし）
    pub const BG_ORANGE: Rgb<u8> = Rgb([255, 220, 180]);
    pub const BG_BLUE: Rgb<u8> = Rgb([200, 215, 255]);
    pub const BG_GREEN: Rgb<u8> = Rgb([200, 240, 200]);
    pub const BG_YELLOW: Rgb<u8> = Rgb([255, 250, 200]);
}

/// ゾーンの色を返す
pub fn zone_color(zone: Zone) -> Rgb<u8> {
    match zone {
        Zone::Public => Colors::BG_ORANGE,
        Zone::Private => Colors::BG_BLUE,
        Zone::Service => Colors::BG_GREEN,
        Zone::Circulation => Colors::BG_YELLOW,
    }
}

pub const LEGEND_ZONES: [Zone; 4] = [Zone::Public, Zone::Private, Zone::Service, Zone::Circulation];
