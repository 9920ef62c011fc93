//! Behavior presets and the quirk set that parameterizes the interpreter.
//!
//! A [`Quirks`] value is the complete behavioral description of one family
//! member: which opcode variants are wired into the dispatch table, the
//! memory size, the start address and the frame pacing. [`Preset`] names the
//! eleven shipped variants and produces their exact quirk sets.

use chip8_core::Properties;

/// Behavior base of a core variant.
///
/// Ordering follows the historical lineage and is meaningful: comparisons
/// like `base < Preset::Chip48` select VIP-derived behavior (Cxnn RNG, key
/// click on Fx0A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Preset {
    Chip8,
    Chip10,
    Chip8E,
    Chip8X,
    Chip48,
    SChip10,
    SChip11,
    SChipC,
    SChipModern,
    MegaChip8,
    XoChip,
}

impl Preset {
    pub const ALL: [Preset; 11] = [
        Preset::Chip8,
        Preset::Chip10,
        Preset::Chip8E,
        Preset::Chip8X,
        Preset::Chip48,
        Preset::SChip10,
        Preset::SChip11,
        Preset::SChipC,
        Preset::SChipModern,
        Preset::MegaChip8,
        Preset::XoChip,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Preset::Chip8 => "CHIP-8",
            Preset::Chip10 => "CHIP-10",
            Preset::Chip8E => "CHIP-8E",
            Preset::Chip8X => "CHIP-8X",
            Preset::Chip48 => "CHIP-48",
            Preset::SChip10 => "SCHIP-1.0",
            Preset::SChip11 => "SCHIP-1.1",
            Preset::SChipC => "SCHIPC",
            Preset::SChipModern => "SCHIP-MODERN",
            Preset::MegaChip8 => "MEGACHIP",
            Preset::XoChip => "XO-CHIP",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Preset::Chip8 => "The classic CHIP-8 as running on the COSMAC VIP",
            Preset::Chip10 => "128x64 only variant of CHIP-8",
            Preset::Chip8E => "CHIP-8 with extended instructions",
            Preset::Chip8X => "CHIP-8 with VP-590 color and VP-595 sound",
            Preset::Chip48 => "HP-48 port of CHIP-8 with changed quirks",
            Preset::SChip10 => "SUPER-CHIP 1.0 with 128x64 hires mode",
            Preset::SChip11 => "SUPER-CHIP 1.1 with scrolling",
            Preset::SChipC => "SUPER-CHIP compatibility fix",
            Preset::SChipModern => "Modernized SUPER-CHIP without display wait",
            Preset::MegaChip8 => "MegaChip 8 with 256x192 indexed color mode",
            Preset::XoChip => "Octo extension with colors and sound",
        }
    }

    /// Exact-name lookup. Matching loosely (case, punctuation) is the
    /// registry's job.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn quirks(self) -> Quirks {
        let base = Quirks { base: self, ..Quirks::default() };
        match self {
            Preset::Chip8 => Quirks { extended_vblank: true, ..base },
            Preset::Chip10 => Quirks {
                allow_hires: true,
                only_hires: true,
                extended_vblank: true,
                ..base
            },
            Preset::Chip8E => Quirks { extended_vblank: true, ..base },
            Preset::Chip8X => Quirks {
                start_address: 0x300,
                extended_vblank: true,
                instructions_per_frame: 18,
                ..base
            },
            Preset::Chip48 => Quirks {
                just_shift_vx: true,
                dont_reset_vf: true,
                load_store_inc_i_by_x: true,
                jump0_bxnn: true,
                instructions_per_frame: 15,
                frame_rate: 64,
                ..base
            },
            Preset::SChip10 => Quirks {
                just_shift_vx: true,
                dont_reset_vf: true,
                load_store_inc_i_by_x: true,
                lores_dxy0_is_8x16: true,
                sc_lores_drawing: true,
                jump0_bxnn: true,
                allow_hires: true,
                instructions_per_frame: 30,
                frame_rate: 64,
                ..base
            },
            Preset::SChip11 => Quirks {
                just_shift_vx: true,
                dont_reset_vf: true,
                load_store_dont_inc_i: true,
                lores_dxy0_is_8x16: true,
                sc11_collision: true,
                sc_lores_drawing: true,
                half_pixel_scroll: true,
                jump0_bxnn: true,
                allow_hires: true,
                instructions_per_frame: 30,
                frame_rate: 64,
                ..base
            },
            Preset::SChipC => Quirks {
                dont_reset_vf: true,
                lores_dxy0_is_8x16: true,
                mode_change_clear: true,
                allow_hires: true,
                instructions_per_frame: 30,
                frame_rate: 64,
                ..base
            },
            Preset::SChipModern => Quirks {
                just_shift_vx: true,
                dont_reset_vf: true,
                load_store_dont_inc_i: true,
                instant_dxyn: true,
                lores_dxy0_is_16x16: true,
                mode_change_clear: true,
                jump0_bxnn: true,
                allow_hires: true,
                instructions_per_frame: 30,
                frame_rate: 64,
                ..base
            },
            Preset::MegaChip8 => Quirks {
                ram_size: 0x100_0000,
                just_shift_vx: true,
                dont_reset_vf: true,
                load_store_dont_inc_i: true,
                lores_dxy0_is_8x16: true,
                sc11_collision: true,
                mode_change_clear: true,
                jump0_bxnn: true,
                allow_hires: true,
                instructions_per_frame: 3000,
                frame_rate: 50,
                ..base
            },
            Preset::XoChip => Quirks {
                ram_size: 0x10000,
                dont_reset_vf: true,
                wrap_sprites: true,
                instant_dxyn: true,
                lores_dxy0_is_16x16: true,
                mode_change_clear: true,
                allow_hires: true,
                allow_colors: true,
                has_16bit_addr: true,
                xo_chip_sound: true,
                instructions_per_frame: 1000,
                ..base
            },
        }
    }
}

/// The full quirk set of one interpreter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    pub base: Preset,
    /// Power of two, at least 4096.
    pub ram_size: u32,
    pub start_address: u32,
    /// Zero RAM on reset instead of filling it with LCG noise.
    pub clean_ram: bool,
    /// 8xy6/8xyE shift Vx in place instead of shifting Vy into Vx.
    pub just_shift_vx: bool,
    /// 8xy1/8xy2/8xy3 leave VF alone.
    pub dont_reset_vf: bool,
    /// Fx55/Fx65 advance I by x instead of x+1.
    pub load_store_inc_i_by_x: bool,
    /// Fx55/Fx65 leave I alone.
    pub load_store_dont_inc_i: bool,
    /// Dxyn wraps sprites at the screen edges instead of clipping.
    pub wrap_sprites: bool,
    /// Dxyn executes without waiting for the frame boundary.
    pub instant_dxyn: bool,
    /// Dxy0 draws 8x16 in lores.
    pub lores_dxy0_is_8x16: bool,
    /// Dxy0 draws 16x16 in lores.
    pub lores_dxy0_is_16x16: bool,
    /// VF counts clipped rows in hires (SCHIP 1.1 collision reporting).
    pub sc11_collision: bool,
    /// Lores pixels are drawn through the SCHIP row-doubling path.
    pub sc_lores_drawing: bool,
    /// Lores scroll offsets are not doubled.
    pub half_pixel_scroll: bool,
    /// 00FE/00FF clear the screen.
    pub mode_change_clear: bool,
    /// Bnnn is Bxnn and jumps to nnn+Vx.
    pub jump0_bxnn: bool,
    /// 00FE/00FF switch between 64x32 and 128x64.
    pub allow_hires: bool,
    /// The core boots in hires and cannot leave it.
    pub only_hires: bool,
    /// Two drawing planes selectable through Fx01.
    pub allow_colors: bool,
    /// Call/return wrap the stack pointer instead of halting.
    pub cyclic_stack: bool,
    /// F000 nnnn loads a 16-bit I.
    pub has_16bit_addr: bool,
    /// Pattern-based audio (Fx3A pitch, F002 pattern).
    pub xo_chip_sound: bool,
    /// Dxyn waits for the vertical blank like the VIP interpreter, with the
    /// short-sprite exception near the top of the blank period.
    pub extended_vblank: bool,
    /// Zero runs the frame unthrottled.
    pub instructions_per_frame: u32,
    pub frame_rate: u32,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            base: Preset::Chip8,
            ram_size: 4096,
            start_address: 0x200,
            clean_ram: true,
            just_shift_vx: false,
            dont_reset_vf: false,
            load_store_inc_i_by_x: false,
            load_store_dont_inc_i: false,
            wrap_sprites: false,
            instant_dxyn: false,
            lores_dxy0_is_8x16: false,
            lores_dxy0_is_16x16: false,
            sc11_collision: false,
            sc_lores_drawing: false,
            half_pixel_scroll: false,
            mode_change_clear: false,
            jump0_bxnn: false,
            allow_hires: false,
            only_hires: false,
            allow_colors: false,
            cyclic_stack: false,
            has_16bit_addr: false,
            xo_chip_sound: false,
            extended_vblank: false,
            instructions_per_frame: 15,
            frame_rate: 60,
        }
    }
}

impl Quirks {
    /// Serializes the quirk set into a flat property bag.
    #[must_use]
    pub fn to_properties(&self) -> Properties {
        let mut props = Properties::new();
        props.set_str("behaviorBase", self.base.name());
        props.set_int("ramSize", i64::from(self.ram_size));
        props.set_int("startAddress", i64::from(self.start_address));
        props.set_bool("cleanRam", self.clean_ram);
        props.set_bool("justShiftVx", self.just_shift_vx);
        props.set_bool("dontResetVf", self.dont_reset_vf);
        props.set_bool("loadStoreIncIByX", self.load_store_inc_i_by_x);
        props.set_bool("loadStoreDontIncI", self.load_store_dont_inc_i);
        props.set_bool("wrapSprites", self.wrap_sprites);
        props.set_bool("instantDxyn", self.instant_dxyn);
        props.set_bool("loresDxy0Is8x16", self.lores_dxy0_is_8x16);
        props.set_bool("loresDxy0Is16x16", self.lores_dxy0_is_16x16);
        props.set_bool("sc11Collision", self.sc11_collision);
        props.set_bool("scLoresDrawing", self.sc_lores_drawing);
        props.set_bool("halfPixelScroll", self.half_pixel_scroll);
        props.set_bool("modeChangeClear", self.mode_change_clear);
        props.set_bool("jump0Bxnn", self.jump0_bxnn);
        props.set_bool("allowHires", self.allow_hires);
        props.set_bool("onlyHires", self.only_hires);
        props.set_bool("allowColors", self.allow_colors);
        props.set_bool("cyclicStack", self.cyclic_stack);
        props.set_bool("has16BitAddr", self.has_16bit_addr);
        props.set_bool("xoChipSound", self.xo_chip_sound);
        props.set_bool("extendedVBlank", self.extended_vblank);
        props.set_int("instructionsPerFrame", i64::from(self.instructions_per_frame));
        props.set_int("frameRate", i64::from(self.frame_rate));
        props
    }

    /// Rebuilds a quirk set from a property bag. Missing keys fall back to
    /// the behavior base's preset values, so a bag containing only
    /// `behaviorBase` reproduces the preset exactly.
    pub fn from_properties(props: &Properties) -> Result<Quirks, String> {
        let base_name = props
            .get_str("behaviorBase")
            .ok_or_else(|| "missing behaviorBase property".to_string())?;
        let base = Preset::from_name(base_name)
            .ok_or_else(|| format!("unknown behavior base '{base_name}'"))?;
        let mut q = base.quirks();
        let int = |key: &str, default: u32| -> Result<u32, String> {
            match props.get_int(key) {
                None => Ok(default),
                Some(v) => {
                    u32::try_from(v).map_err(|_| format!("property {key} out of range: {v}"))
                }
            }
        };
        q.ram_size = int("ramSize", q.ram_size)?;
        q.start_address = int("startAddress", q.start_address)?;
        q.instructions_per_frame = int("instructionsPerFrame", q.instructions_per_frame)?;
        q.frame_rate = int("frameRate", q.frame_rate)?;
        let flag = |key: &str, default: bool| props.get_bool(key).unwrap_or(default);
        q.clean_ram = flag("cleanRam", q.clean_ram);
        q.just_shift_vx = flag("justShiftVx", q.just_shift_vx);
        q.dont_reset_vf = flag("dontResetVf", q.dont_reset_vf);
        q.load_store_inc_i_by_x = flag("loadStoreIncIByX", q.load_store_inc_i_by_x);
        q.load_store_dont_inc_i = flag("loadStoreDontIncI", q.load_store_dont_inc_i);
        q.wrap_sprites = flag("wrapSprites", q.wrap_sprites);
        q.instant_dxyn = flag("instantDxyn", q.instant_dxyn);
        q.lores_dxy0_is_8x16 = flag("loresDxy0Is8x16", q.lores_dxy0_is_8x16);
        q.lores_dxy0_is_16x16 = flag("loresDxy0Is16x16", q.lores_dxy0_is_16x16);
        q.sc11_collision = flag("sc11Collision", q.sc11_collision);
        q.sc_lores_drawing = flag("scLoresDrawing", q.sc_lores_drawing);
        q.half_pixel_scroll = flag("halfPixelScroll", q.half_pixel_scroll);
        q.mode_change_clear = flag("modeChangeClear", q.mode_change_clear);
        q.jump0_bxnn = flag("jump0Bxnn", q.jump0_bxnn);
        q.allow_hires = flag("allowHires", q.allow_hires);
        q.only_hires = flag("onlyHires", q.only_hires);
        q.allow_colors = flag("allowColors", q.allow_colors);
        q.cyclic_stack = flag("cyclicStack", q.cyclic_stack);
        q.has_16bit_addr = flag("has16BitAddr", q.has_16bit_addr);
        q.xo_chip_sound = flag("xoChipSound", q.xo_chip_sound);
        q.extended_vblank = flag("extendedVBlank", q.extended_vblank);
        Ok(q)
    }

    /// Width of the full framebuffer for this quirk set.
    #[must_use]
    pub fn max_screen_width(&self) -> usize {
        if self.base == Preset::MegaChip8 {
            256
        } else if self.allow_hires {
            128
        } else {
            64
        }
    }

    /// Height of the full framebuffer for this quirk set.
    #[must_use]
    pub fn max_screen_height(&self) -> usize {
        if self.base == Preset::MegaChip8 {
            192
        } else if self.allow_hires {
            64
        } else {
            32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup_is_exact() {
        assert_eq!(Preset::from_name("XO-CHIP"), Some(Preset::XoChip));
        assert_eq!(Preset::from_name("xo-chip"), None);
    }

    #[test]
    fn properties_round_trip_all_presets() {
        for preset in Preset::ALL {
            let quirks = preset.quirks();
            let props = quirks.to_properties();
            let back = Quirks::from_properties(&props).unwrap();
            assert_eq!(back, quirks, "{}", preset.name());
        }
    }

    #[test]
    fn base_only_bag_reproduces_preset() {
        let mut props = Properties::new();
        props.set_str("behaviorBase", "SCHIP-1.1");
        let quirks = Quirks::from_properties(&props).unwrap();
        assert_eq!(quirks, Preset::SChip11.quirks());
    }

    #[test]
    fn overridden_flag_survives() {
        let mut props = Preset::Chip8.quirks().to_properties();
        props.set_bool("wrapSprites", true);
        props.set_int("instructionsPerFrame", 30);
        let quirks = Quirks::from_properties(&props).unwrap();
        assert!(quirks.wrap_sprites);
        assert_eq!(quirks.instructions_per_frame, 30);
        assert!(quirks.extended_vblank);
    }

    #[test]
    fn lineage_ordering() {
        assert!(Preset::Chip8X < Preset::Chip48);
        assert!(Preset::Chip48 < Preset::SChip10);
        assert!(Preset::MegaChip8 < Preset::XoChip);
    }
}
