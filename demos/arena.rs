use ::rand::thread_rng;
use macroquad::prelude::*;
use polyarena_rs::dynamics::{Body, BodyDef, BodyHandle, World, WorldConfig};
use polyarena_rs::math::Vec2;

const STEPS_PER_SECOND: f32 = 60.0;

const PALETTE: [u32; 5] = [0xFF0000, 0x7DFF00, 0x007DFF, 0xEBEB0F, 0xFF005A];

fn window_conf() -> Conf {
    let arena = WorldConfig::default().arena;
    Conf {
        window_title: "polyarena".to_owned(),
        window_width: arena.x as i32,
        window_height: arena.y as i32,
        ..Default::default()
    }
}

fn to_color(rgb: u32) -> Color {
    Color::from_rgba((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
}

fn sides_from_key() -> Option<u32> {
    let keys = [
        (KeyCode::Key3, 3),
        (KeyCode::Key4, 4),
        (KeyCode::Key5, 5),
        (KeyCode::Key6, 6),
        (KeyCode::Key7, 7),
        (KeyCode::Key8, 8),
        (KeyCode::Key9, 9),
    ];
    keys.iter()
        .find(|(k, _)| is_key_pressed(*k))
        .map(|&(_, sides)| sides)
}

fn draw_body(body: &Body) {
    let p = body.position();
    let center = vec2(p.x, p.y);
    let color = to_color(body.color());
    let verts = body.world_vertices();

    // Regular polygons are convex, so a fan from the centre fills them.
    for (i, a) in verts.iter().enumerate() {
        let b = verts[(i + 1) % verts.len()];
        draw_triangle(center, vec2(a.x, a.y), vec2(b.x, b.y), color);
    }
    if body.is_fixed() {
        for (i, a) in verts.iter().enumerate() {
            let b = verts[(i + 1) % verts.len()];
            draw_line(a.x, a.y, b.x, b.y, 2.0, WHITE);
        }
    }

    let label = format!("{}", body.mass());
    let size = measure_text(&label, None, 20, 1.0);
    draw_text(&label, p.x - size.width / 2.0, p.y + size.height / 2.0, 20.0, BLACK);
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut world = World::default();
    let mut rng = thread_rng();
    let mut next_color = 0;
    let mut last: Option<BodyHandle> = None;

    let dt = 1.0 / STEPS_PER_SECOND;
    let mut accumulator = 0.0;

    loop {
        if let Some(sides) = sides_from_key() {
            let def = BodyDef {
                color: PALETTE[next_color],
                ..BodyDef::random(&mut rng, sides)
            };
            match world.create_body(def) {
                Ok(h) => {
                    last = Some(h);
                    next_color = (next_color + 1) % PALETTE.len();
                }
                Err(e) => log::error!("spawn failed: {e}"),
            }
        }

        if is_key_pressed(KeyCode::F) {
            if let Some(h) = last {
                let fixed = world.body(h).is_some_and(|b| b.is_fixed());
                if let Err(e) = world.set_fixed(h, !fixed) {
                    log::error!("{e}");
                }
            }
        }

        // Drag the last body around while it is fixed.
        if let Some(h) = last.filter(|&h| world.body(h).is_some_and(|b| b.is_fixed())) {
            if is_mouse_button_down(MouseButton::Left) {
                let (mx, my) = mouse_position();
                if let Err(e) = world.anchor(h, Vec2::new(mx, my)) {
                    log::error!("{e}");
                }
            }
        }

        if is_key_pressed(KeyCode::C) {
            world.clear();
            last = None;
        }

        // Fixed-rate ticks; cap the backlog so a stalled frame doesn't spiral.
        accumulator = (accumulator + get_frame_time()).min(0.25);
        while accumulator >= dt {
            world.step(dt);
            accumulator -= dt;
        }

        clear_background(Color::from_rgba(30, 30, 36, 255));
        for (_, body) in world.bodies() {
            draw_body(body);
        }

        let origin = Vec2::new(10.0, 20.0);
        draw_text(
            &format!("{} bodies | 3-9 spawn, F fix last, drag fixed, C clear", world.len()),
            origin.x,
            origin.y,
            20.0,
            WHITE,
        );

        next_frame().await
    }
}
