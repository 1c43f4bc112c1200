//! Canvas 2D backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Sprite, hud_lines};
use crate::sim::{PowerUpKind, Snapshot};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: Vec<(Sprite, HtmlImageElement)>,
    sprites_enabled: bool,
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading sprite images
    pub fn new(canvas: &HtmlCanvasElement, sprites_enabled: bool) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let images = Sprite::ALL
            .iter()
            .filter_map(|&sprite| {
                let img = HtmlImageElement::new().ok()?;
                img.set_src(sprite.path());
                Some((sprite, img))
            })
            .collect();

        Some(Self {
            ctx,
            images,
            sprites_enabled,
        })
    }

    /// Loaded image for a sprite, or None if it is not ready yet
    fn ready_image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        if !self.sprites_enabled {
            return None;
        }
        self.images
            .iter()
            .find(|(s, _)| *s == sprite)
            .map(|(_, img)| img)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    fn draw(&self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
        let (x, y, w, h) = (x as f64, y as f64, w as f64, h as f64);
        if let Some(img) = self.ready_image(sprite) {
            if self
                .ctx
                .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                .is_ok()
            {
                return;
            }
        }
        self.ctx.set_fill_style_str(sprite.fallback_color());
        self.ctx.fill_rect(x, y, w, h);
    }

    pub fn render(&self, snapshot: &Snapshot<'_>) {
        let arena = snapshot.arena;
        self.ctx
            .clear_rect(0.0, 0.0, arena.width as f64, arena.height as f64);
        self.draw(Sprite::Background, 0.0, 0.0, arena.width, arena.height);

        for obstacle in snapshot.obstacles {
            self.draw(
                Sprite::Obstacle,
                obstacle.pos.x,
                obstacle.pos.y,
                obstacle.size.x,
                obstacle.size.y,
            );
        }
        for coin in snapshot.coins {
            let d = coin.radius * 2.0;
            self.draw(Sprite::Coin, coin.pos.x, coin.pos.y, d, d);
        }
        for power_up in snapshot.power_ups {
            self.draw(
                Sprite::for_power_up(power_up.kind),
                power_up.pos.x,
                power_up.pos.y,
                power_up.size.x,
                power_up.size.y,
            );
        }

        let player = snapshot.player;
        self.draw(
            Sprite::Player,
            player.pos.x,
            player.pos.y,
            player.size.x,
            player.size.y,
        );
        if snapshot.effects.is_active(PowerUpKind::Shield) {
            let center = player.pos + player.size / 2.0;
            let radius = player.size.max_element() * 0.65;
            self.ctx.begin_path();
            if self
                .ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .is_ok()
            {
                self.ctx.set_stroke_style_str(Sprite::Shield.fallback_color());
                self.ctx.set_line_width(4.0);
                self.ctx.stroke();
            }
        }

        self.ctx.set_fill_style_str("white");
        self.ctx.set_font("20px Arial");
        for (i, line) in hud_lines(snapshot).iter().enumerate() {
            let _ = self.ctx.fill_text(line, 10.0, 20.0 + 30.0 * i as f64);
        }
    }
}
