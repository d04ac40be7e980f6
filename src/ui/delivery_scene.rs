//! Delivery scene rendering.
//!
//! Draws stars, terrain, pad, ship and flame into a cell buffer scaled from
//! world coordinates, then the HUD, the info panel and whichever card the
//! session state calls for.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_result_card, render_status_bar,
    render_too_small, CardTone,
};
use orbital_delivery::delivery::{
    CampaignStats, DeliverySession, PackageKind, SessionState, ShipFacing,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MIN_WIDTH: u16 = 48;
const MIN_HEIGHT: u16 = 16;
const INFO_PANEL_WIDTH: u16 = 24;

/// Cell in the render buffer.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Character grid with world-to-cell scaling.
struct SceneBuffer {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    x_scale: f64,
    y_scale: f64,
}

impl SceneBuffer {
    fn new(width: u16, height: u16, world_width: f64, world_height: f64) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            cells: vec![vec![Cell::default(); width]; height],
            width,
            height,
            x_scale: width as f64 / world_width,
            y_scale: height as f64 / world_height,
        }
    }

    fn col(&self, x: f64) -> i32 {
        (x * self.x_scale).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.y_scale).floor() as i32
    }

    /// World x at the middle of `col`.
    fn world_x(&self, col: usize) -> f64 {
        (col as f64 + 0.5) / self.x_scale
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height {
            let cell = &mut self.cells[row as usize][col as usize];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    fn put_text(&mut self, col: usize, row: usize, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put((col + i) as i32, row as i32, ch, fg);
        }
    }

    fn render(self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_data) in self.cells.iter().enumerate() {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for &cell in row_data.iter() {
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let row_area = Rect::new(area.x, area.y + row_idx as u16, self.width as u16, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

/// Title screen with the campaign tallies.
pub fn render_title(frame: &mut Frame, area: Rect, difficulty: u32, stats: CampaignStats) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Orbital Delivery ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            "O R B I T A L   D E L I V E R Y",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Land the package on the pad. Gently.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Next level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(difficulty.to_string(), Style::default().fg(Color::Yellow)),
        ]),
    ];
    if stats.deliveries > 0 {
        lines.push(Line::from(vec![
            Span::styled("Deliveries: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ({} safe)", stats.deliveries, stats.safe_landings),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Best level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                stats.best_level.to_string(),
                Style::default().fg(Color::White),
            ),
        ]));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled(
            "[Space] Start    [Esc] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let height = lines.len() as u16;
    let y = inner.y + inner.height.saturating_sub(height) / 2;
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, Rect::new(inner.x, y, inner.width, height.min(inner.height)));
}

/// Render one delivery attempt.
pub fn render_delivery_scene(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        render_too_small(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let title = format!(" Orbital Delivery - Level {} ", session.difficulty());
    let layout = create_game_layout(
        frame,
        area,
        &title,
        Color::LightBlue,
        10,
        INFO_PANEL_WIDTH,
    );

    render_play_field(frame, layout.content, session);
    render_status_bar_content(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session);

    match session.state() {
        SessionState::Orbit => render_briefing(frame, layout.content, session),
        SessionState::Rating => render_rating_card(frame, layout.content, session),
        SessionState::GameOver => render_game_over(frame, layout.content, session),
        SessionState::Descent | SessionState::Landed | SessionState::Crashed => {}
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    if area.height < 2 || area.width < 10 {
        return;
    }
    let config = session.config();
    let mut buffer = SceneBuffer::new(
        area.width,
        area.height,
        config.screen_width,
        config.screen_height,
    );

    // -- Stars --
    for row in 0..buffer.height.saturating_sub(4) {
        for col in 0..buffer.width {
            match (row * 137 + col * 251 + 97) % 200 {
                0 => buffer.put(col as i32, row as i32, '.', Color::DarkGray),
                1 => buffer.put(col as i32, row as i32, '*', Color::Rgb(80, 80, 100)),
                _ => {}
            }
        }
    }

    // -- Terrain --
    let level = session.level();
    for col in 0..buffer.width {
        let surface = buffer.row(level.terrain_height(buffer.world_x(col))).max(0) as usize;
        for row in surface..buffer.height {
            let cell = &mut buffer.cells[row][col];
            if row == surface {
                cell.ch = '^';
                cell.fg = Color::Rgb(140, 120, 100);
            } else {
                cell.ch = if (row + col) % 3 == 0 { '.' } else { ' ' };
                cell.fg = Color::Rgb(60, 50, 40);
                cell.bg = Color::Rgb(30, 25, 20);
            }
        }
    }

    // -- Pad --
    let pad = level.pad();
    let pad_row = buffer.row(pad.y());
    let (left, right) = (buffer.col(pad.x()), buffer.col(pad.right()));
    for col in left..=right {
        buffer.put(col, pad_row, '=', Color::Green);
    }
    buffer.put(left - 1, pad_row - 1, '[', Color::Green);
    buffer.put(right + 1, pad_row - 1, ']', Color::Green);

    // -- Ship and flame --
    let ship = session.ship();
    let ship_col = buffer.col(ship.x);
    let ship_row = buffer.row(ship.y);
    let facing = ship.facing();
    if ship.thrusting {
        let flicker = session.ticks();
        let color = if flicker % 2 == 0 {
            Color::Yellow
        } else {
            Color::LightRed
        };
        for (ch, (dx, dy)) in flame_sprite(facing, flicker) {
            buffer.put(ship_col + dx, ship_row + dy, ch, color);
        }
    }
    let hull_color = match session.state() {
        SessionState::Crashed => Color::Red,
        SessionState::Landed => Color::Green,
        _ => Color::White,
    };
    for (ch, (dx, dy)) in ship_sprite(facing) {
        buffer.put(ship_col + dx, ship_row + dy, ch, hull_color);
    }

    // -- HUD: fuel bar (top-left) --
    let fuel_pct = ship.fuel_fraction();
    let bar_width = 10usize;
    let filled = (fuel_pct * bar_width as f64).round() as usize;
    let fuel_color = if fuel_pct < 0.2 {
        Color::Red
    } else if fuel_pct < 0.5 {
        Color::Yellow
    } else {
        Color::Green
    };
    buffer.put_text(0, 0, "FUEL [", Color::DarkGray);
    let bar: String = (0..bar_width)
        .map(|i| if i < filled { '|' } else { ' ' })
        .collect();
    buffer.put_text(6, 0, &bar, fuel_color);
    buffer.put_text(6 + bar_width, 0, "]", Color::DarkGray);
    buffer.put_text(
        7 + bar_width,
        0,
        &format!(" {}%", (fuel_pct * 100.0).round() as u32),
        Color::White,
    );

    // -- HUD: altitude and speed (top-right) --
    let alt_text = format!("ALT:{:.0}", session.altitude());
    let over_pad = pad.contains_x(ship.x);
    buffer.put_text(
        buffer.width.saturating_sub(alt_text.len() + 1),
        0,
        &alt_text,
        if over_pad { Color::Green } else { Color::White },
    );
    let speed = ship.speed();
    let spd_text = format!("SPD:{:.2}", speed);
    buffer.put_text(
        buffer.width.saturating_sub(spd_text.len() + 1),
        1,
        &spd_text,
        speed_color(speed, config.max_landing_velocity),
    );

    buffer.render(frame, area);
}

fn speed_color(speed: f64, limit: f64) -> Color {
    if speed <= limit {
        Color::Green
    } else if speed <= limit * 2.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Ship glyphs as (char, (dx, dy)) offsets from the ship's cell.
fn ship_sprite(facing: ShipFacing) -> Vec<(char, (i32, i32))> {
    match facing {
        ShipFacing::Up => vec![('^', (0, -1)), ('|', (0, 0)), ('/', (-1, 1)), ('\\', (1, 1))],
        ShipFacing::Left => vec![('/', (-1, -1)), ('|', (0, 0)), ('/', (-1, 1)), ('_', (1, 1))],
        ShipFacing::HardLeft => {
            vec![('<', (-1, 0)), ('-', (0, 0)), ('/', (-1, 1)), ('_', (1, 1))]
        }
        ShipFacing::Right => {
            vec![('\\', (1, -1)), ('|', (0, 0)), ('_', (-1, 1)), ('\\', (1, 1))]
        }
        ShipFacing::HardRight => {
            vec![('>', (1, 0)), ('-', (0, 0)), ('_', (-1, 1)), ('\\', (1, 1))]
        }
        ShipFacing::Down => vec![('v', (0, 1)), ('|', (0, 0)), ('\\', (-1, -1)), ('/', (1, -1))],
    }
}

/// Flame glyphs opposite the nose. Every third tick the flame is short.
fn flame_sprite(facing: ShipFacing, tick: u64) -> Vec<(char, (i32, i32))> {
    let long = tick % 3 != 0;
    let (near, far) = match facing {
        ShipFacing::Up => ((0, 2), (0, 3)),
        ShipFacing::Left => ((1, 2), (2, 3)),
        ShipFacing::HardLeft => ((2, 0), (3, 0)),
        ShipFacing::Right => ((-1, 2), (-2, 3)),
        ShipFacing::HardRight => ((-2, 0), (-3, 0)),
        ShipFacing::Down => ((0, -2), (0, -3)),
    };
    let mut flame = vec![('*', near)];
    if long {
        flame.push(('.', far));
    }
    flame
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    let ship = session.ship();
    let (status, color, controls): (&str, Color, &[(&str, &str)]) = match session.state() {
        SessionState::Orbit => (
            "In orbit above the drop zone",
            Color::Cyan,
            &[("[Space]", "Begin descent"), ("[Esc]", "Title")],
        ),
        SessionState::Descent => {
            let (status, color) = if !ship.can_thrust() {
                ("NO FUEL", Color::Red)
            } else if session.level().pad().contains_x(ship.x) {
                ("Over pad", Color::Green)
            } else {
                ("Descending", Color::LightBlue)
            };
            (
                status,
                color,
                &[
                    ("[A/D]", "Rotate"),
                    ("[W/Up]", "Thrust"),
                    ("[Esc]", "Abort"),
                ],
            )
        }
        SessionState::Landed => (
            "Touchdown!",
            Color::Green,
            &[("[Space]", "Report"), ("[Esc]", "Title")],
        ),
        SessionState::Crashed => (
            "Impact!",
            Color::Red,
            &[("[Space]", "Report"), ("[Esc]", "Title")],
        ),
        SessionState::Rating => (
            "Delivery report",
            Color::Yellow,
            &[("[Space]", "Next delivery"), ("[Esc]", "Title")],
        ),
        SessionState::GameOver => (
            "Lost to the void",
            Color::Red,
            &[("[Space]", "Restart"), ("[Esc]", "Title")],
        ),
    };
    render_status_bar(frame, area, status, color, controls);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    if area.width < 2 {
        return;
    }
    let inner = render_info_panel_frame(frame, area);
    let ship = session.ship();
    let package = session.package();
    let config = session.config();

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let kind_color = match package.kind() {
        PackageKind::Fragile => Color::Magenta,
        PackageKind::Urgent => Color::LightRed,
        PackageKind::Mystery => Color::Gray,
    };

    let mut lines: Vec<Line> = package
        .description()
        .lines()
        .enumerate()
        .map(|(i, text)| {
            let style = if i == 0 {
                Style::default().fg(kind_color).add_modifier(Modifier::BOLD)
            } else {
                label
            };
            Line::from(Span::styled(text.to_string(), style))
        })
        .collect();

    let speed = ship.speed();
    lines.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled("Fuel:  ", label),
            Span::styled(format!("{:.1}", ship.fuel()), value),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{:.2}", speed),
                Style::default().fg(speed_color(speed, config.max_landing_velocity)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Alt:   ", label),
            Span::styled(format!("{:.0}", session.altitude()), value),
        ]),
        Line::from(vec![
            Span::styled("Angle: ", label),
            Span::styled(format!("{:+.0}deg", ship.angle), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Time:  ", label),
            Span::styled(format!("{:.1}s", package.delivery_time()), value),
        ]),
        Line::from(vec![
            Span::styled("Jolts: ", label),
            Span::styled(format!("{:.1} dv", package.total_delta_v()), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Safe landing:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" Speed ", label),
            Span::styled(
                format!("<={:.1}", config.max_landing_velocity),
                Style::default().fg(Color::Green),
            ),
        ]),
    ]);

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_briefing(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    let package = session.package();
    let focus = match package.kind() {
        PackageKind::Fragile => "Rated on how rough the ride is.",
        PackageKind::Urgent => "Rated on delivery time.",
        PackageKind::Mystery => "Nobody knows what it wants.",
    };
    let body = package
        .description()
        .lines()
        .map(|line| Line::from(line.to_string()))
        .chain([
            Line::from(""),
            Line::from(Span::styled(focus, Style::default().fg(Color::DarkGray))),
        ])
        .collect();
    render_result_card(
        frame,
        area,
        CardTone::Briefing,
        &format!("LEVEL {} BRIEFING", session.difficulty()),
        body,
        "[Space] Begin descent",
    );
}

fn render_rating_card(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    let package = session.package();
    let (tone, title) = if session.succeeded() {
        (CardTone::Success, "DELIVERED")
    } else {
        (CardTone::Failure, "DELIVERY FAILED")
    };
    let body = vec![
        Line::from(Span::styled(
            package.stars(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("\"{}\"", package.review().unwrap_or_default()),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("- {}", package.name()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{:.1}s  |  {:.1} dv  |  {:.0} fuel left",
                package.delivery_time(),
                package.total_delta_v(),
                session.ship().fuel()
            ),
            Style::default().fg(Color::Cyan),
        )),
    ];
    render_result_card(frame, area, tone, title, body, "[Space] Next delivery");
}

fn render_game_over(frame: &mut Frame, area: Rect, session: &DeliverySession) {
    let body = vec![
        Line::from("Out of fuel and falling fast."),
        Line::from(format!(
            "The {} was last seen at level {}.",
            session.package().name(),
            session.difficulty()
        )),
    ];
    render_result_card(
        frame,
        area,
        CardTone::GameOver,
        "GAME OVER",
        body,
        "[Space] Restart from level 1",
    );
}
