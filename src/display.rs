use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// 64x32 monochrome pixel grid. Pixels only change through [`Framebuffer::clear`]
/// and the XOR in [`Framebuffer::draw`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    screen: [[bool; WIDTH]; HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            screen: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.screen = [[false; WIDTH]; HEIGHT];
    }

    pub fn width(&self) -> usize {
        WIDTH
    }

    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// Pixel state; coordinates wrap the same way sprites do.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.screen[y % HEIGHT][x % WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; WIDTH]> {
        self.screen.iter()
    }

    pub fn lit_count(&self) -> usize {
        self.screen.iter().flatten().filter(|&&p| p).count()
    }

    /// XOR `sprite` onto the screen with its top-left corner at
    /// `(reg_x mod 64, reg_y mod 32)`. Rows and columns past the edge wrap
    /// around. Returns whether any lit pixel was switched off.
    pub fn draw(&mut self, reg_x: u8, reg_y: u8, sprite: &[u8]) -> bool {
        let x = (reg_x % SCREEN_WIDTH) as usize;
        let y = (reg_y % SCREEN_HEIGHT) as usize;
        let mut collision = false;

        for (yo, data) in sprite.iter().enumerate() {
            let row = (y + yo) % HEIGHT;

            for (xo, bit) in byte_to_bits(*data).iter().enumerate() {
                if !bit {
                    continue;
                }
                let col = (x + xo) % WIDTH;
                let cell = &mut self.screen[row][col];
                collision |= *cell;
                *cell ^= true;
            }
        }
        collision
    }

    /// Text rendering for terminal hosts, one line per row.
    pub fn render(&self) -> String {
        let mut res = String::with_capacity((self.width() * 3 + 1) * self.height());

        for row in self.rows() {
            for &pixel in row {
                res.push(if pixel { '█' } else { '░' });
            }
            res.push('\n');
        }
        res
    }
}

/// Bits from the most to least significant
fn byte_to_bits(b: u8) -> [bool; 8] {
    std::array::from_fn(|i| (b >> (7 - i)) & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_bits_msb_first() {
        assert_eq!(
            byte_to_bits(0b1000_0001),
            [true, false, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_draw_sets_pixels_without_collision() {
        let mut fb = Framebuffer::new();
        assert!(!fb.draw(2, 3, &[0xC0]));
        assert!(fb.pixel(2, 3));
        assert!(fb.pixel(3, 3));
        assert!(!fb.pixel(4, 3));
        assert_eq!(fb.lit_count(), 2);
    }

    #[test]
    fn test_draw_twice_erases_and_collides() {
        let mut fb = Framebuffer::new();
        let sprite = [0xF0, 0x90, 0xF0];
        fb.draw(10, 10, &sprite);
        assert!(fb.draw(10, 10, &sprite));
        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_draw_wraps_columns_and_rows() {
        let mut fb = Framebuffer::new();
        fb.draw(62, 31, &[0xF0, 0xF0]);
        assert!(fb.pixel(62, 31));
        assert!(fb.screen[31][63]);
        assert!(fb.screen[31][0]);
        assert!(fb.screen[31][1]);
        assert!(fb.screen[0][62]);
        assert!(fb.screen[0][1]);
        assert_eq!(fb.lit_count(), 8);
    }

    #[test]
    fn test_start_position_is_taken_modulo_screen() {
        let mut fb = Framebuffer::new();
        fb.draw(64 + 5, 32 + 7, &[0x80]);
        assert!(fb.screen[7][5]);
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0xFF; 15]);
        fb.clear();
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn test_render_shape() {
        let mut fb = Framebuffer::new();
        fb.draw(0, 0, &[0x80]);
        let text = fb.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines[0].starts_with('█'));
        assert_eq!(lines[0].chars().count(), 64);
    }
}
