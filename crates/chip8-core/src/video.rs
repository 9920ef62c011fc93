//! Palette-indexed framebuffer with sprite XOR primitives.
//!
//! All CHIP-8 drawing is XOR drawing: a sprite pixel toggles the framebuffer
//! pixel and reports a collision when it clears one. Multi-plane variants
//! (XO-CHIP) store one bit per plane in the same byte, so the primitives take
//! a plane mask rather than a boolean.

/// RGBA palette, one `0xRRGGBBAA` entry per pixel value.
pub type Palette = [u32; 256];

/// Fixed-size framebuffer with palette-indexed 8-bit pixels.
///
/// `W`/`H` are the maximum dimensions; `set_mode` narrows the active area for
/// cores that switch between lores and hires within one buffer.
#[derive(Debug, Clone)]
pub struct VideoScreen<const W: usize, const H: usize> {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
    palette: Box<Palette>,
}

impl<const W: usize, const H: usize> Default for VideoScreen<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> VideoScreen<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;

    #[must_use]
    pub fn new() -> Self {
        let mut palette = Box::new([0u32; 256]);
        palette[0] = 0x0000_00FF;
        palette[1] = 0xFFFF_FFFF;
        palette[2] = 0xCCCC_CCFF;
        palette[3] = 0x8888_88FF;
        Self {
            buffer: vec![0; W * H],
            width: W,
            height: H,
            palette,
        }
    }

    /// Set the active area (the stride stays `W`).
    pub fn set_mode(&mut self, width: usize, height: usize) {
        debug_assert!(width <= W && height <= H);
        self.width = width;
        self.height = height;
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn stride(&self) -> usize {
        W
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: &[u32]) {
        for (dst, src) in self.palette.iter_mut().zip(palette) {
            *dst = *src;
        }
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.buffer[y * W + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) {
        self.buffer[y * W + x] = value;
    }

    pub fn set_all(&mut self, value: u8) {
        self.buffer.fill(value);
    }

    /// AND every pixel with `mask` (used to clear selected planes).
    pub fn binary_and(&mut self, mask: u8) {
        for pixel in &mut self.buffer {
            *pixel &= mask;
        }
    }

    /// XOR `planes` into one pixel; true if any set plane bit was cleared.
    pub fn draw_sprite_pixel(&mut self, x: usize, y: usize, planes: u8) -> bool {
        let pixel = &mut self.buffer[y * W + x];
        let collision = *pixel & planes != 0;
        *pixel ^= planes;
        collision
    }

    /// XOR a 2x2 block in lores (pixel doubling), a single pixel in hires.
    pub fn draw_sprite_pixel_doubled(&mut self, x: usize, y: usize, planes: u8, hires: bool) -> bool {
        let mut collision = self.draw_sprite_pixel(x, y, planes);
        if !hires {
            collision |= self.draw_sprite_pixel(x + 1, y, planes);
            collision |= self.draw_sprite_pixel(x, y + 1, planes);
            collision |= self.draw_sprite_pixel(x + 1, y + 1, planes);
        }
        collision
    }

    /// SCHIP lores drawing: doubled horizontally only (half-height rows).
    pub fn draw_sprite_pixel_doubled_sc(&mut self, x: usize, y: usize, planes: u8, hires: bool) -> bool {
        if planes == 0 {
            return false;
        }
        let mut collision = self.draw_sprite_pixel(x, y, planes);
        if !hires {
            collision |= self.draw_sprite_pixel(x + 1, y, planes);
        }
        collision
    }

    /// Scrolls operate on the active area, so pixels outside the current
    /// mode never bleed in.
    pub fn scroll_down(&mut self, n: usize) {
        for y in (n..self.height).rev() {
            self.buffer.copy_within((y - n) * W..(y - n) * W + self.width, y * W);
        }
        for y in 0..n.min(self.height) {
            self.buffer[y * W..y * W + self.width].fill(0);
        }
    }

    pub fn scroll_up(&mut self, n: usize) {
        for y in n..self.height {
            self.buffer.copy_within(y * W..y * W + self.width, (y - n) * W);
        }
        for y in self.height.saturating_sub(n)..self.height {
            self.buffer[y * W..y * W + self.width].fill(0);
        }
    }

    pub fn scroll_left(&mut self, n: usize) {
        let n = n.min(self.width);
        for y in 0..self.height {
            let row = y * W;
            self.buffer.copy_within(row + n..row + self.width, row);
            self.buffer[row + self.width - n..row + self.width].fill(0);
        }
    }

    pub fn scroll_right(&mut self, n: usize) {
        let n = n.min(self.width);
        for y in 0..self.height {
            let row = y * W;
            self.buffer.copy_within(row..row + self.width - n, row + n);
            self.buffer[row..row + n].fill(0);
        }
    }

    /// Copy the pixels `x1..x2` of row `y_src` onto row `y_dst`.
    pub fn copy_pixel_row(&mut self, x1: usize, x2: usize, y_src: usize, y_dst: usize) {
        for x in x1..x2 {
            self.buffer[y_dst * W + x] = self.buffer[y_src * W + x];
        }
    }

    /// Move the masked plane bits from one pixel to another (masked scroll).
    pub fn move_pixel_masked(&mut self, sx: usize, sy: usize, dx: usize, dy: usize, mask: u8) {
        let src = self.buffer[sy * W + sx] & mask;
        let dst = &mut self.buffer[dy * W + dx];
        *dst = (*dst & !mask) | src;
    }

    pub fn clear_pixel_masked(&mut self, x: usize, y: usize, mask: u8) {
        self.buffer[y * W + x] &= !mask;
    }

    /// Convert the active area to RGBA through the palette.
    pub fn to_rgba(&self, out: &mut [u32]) {
        for y in 0..self.height {
            for x in 0..self.width {
                out[y * self.width + x] = self.palette[self.buffer[y * W + x] as usize];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Screen = VideoScreen<128, 64>;

    #[test]
    fn xor_draw_is_self_inverse() {
        let mut screen = Screen::new();
        assert!(!screen.draw_sprite_pixel(10, 10, 1));
        assert_eq!(screen.pixel(10, 10), 1);
        assert!(screen.draw_sprite_pixel(10, 10, 1));
        assert_eq!(screen.pixel(10, 10), 0);
    }

    #[test]
    fn plane_masks_collide_independently() {
        let mut screen = Screen::new();
        screen.draw_sprite_pixel(5, 5, 0b01);
        // plane 2 does not collide with plane 1
        assert!(!screen.draw_sprite_pixel(5, 5, 0b10));
        assert_eq!(screen.pixel(5, 5), 0b11);
        assert!(screen.draw_sprite_pixel(5, 5, 0b11));
        assert_eq!(screen.pixel(5, 5), 0);
    }

    #[test]
    fn doubled_draw_covers_block() {
        let mut screen = Screen::new();
        screen.draw_sprite_pixel_doubled(4, 4, 1, false);
        assert_eq!(screen.pixel(4, 4), 1);
        assert_eq!(screen.pixel(5, 4), 1);
        assert_eq!(screen.pixel(4, 5), 1);
        assert_eq!(screen.pixel(5, 5), 1);
    }

    #[test]
    fn scrolls_blank_the_vacated_area() {
        let mut screen = Screen::new();
        screen.set_pixel(0, 0, 1);
        screen.scroll_down(2);
        assert_eq!(screen.pixel(0, 0), 0);
        assert_eq!(screen.pixel(0, 2), 1);

        screen.scroll_right(4);
        assert_eq!(screen.pixel(0, 2), 0);
        assert_eq!(screen.pixel(4, 2), 1);

        screen.scroll_left(4);
        assert_eq!(screen.pixel(0, 2), 1);

        screen.scroll_up(2);
        assert_eq!(screen.pixel(0, 0), 1);
    }

    #[test]
    fn masked_move_preserves_other_planes() {
        let mut screen = Screen::new();
        screen.set_pixel(0, 0, 0b01);
        screen.set_pixel(1, 0, 0b10);
        // move plane 1 from (0,0) onto (1,0), leaving plane 2 there intact
        screen.move_pixel_masked(0, 0, 1, 0, 0b01);
        assert_eq!(screen.pixel(1, 0), 0b11);
    }
}
