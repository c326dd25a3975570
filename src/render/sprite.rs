//! Sprite instances and texture slots

use bytemuck::{Pod, Zeroable};

use crate::consts::{SCALE, SPRITE_SCALING};
use crate::sim::state::{Entity, EntityKind, Tier};

/// Texture slots the host loads at startup
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    Background,
    Ship,
    LifeIcon,
    Bullet,
    MeteorLarge1,
    MeteorLarge2,
    MeteorLarge3,
    MeteorLarge4,
    MeteorSmall1,
    MeteorSmall2,
    MeteorSmaller1,
    MeteorSmaller2,
    MeteorTiny1,
    MeteorTiny2,
}

impl TextureId {
    pub const ALL: [TextureId; 14] = [
        TextureId::Background,
        TextureId::Ship,
        TextureId::LifeIcon,
        TextureId::Bullet,
        TextureId::MeteorLarge1,
        TextureId::MeteorLarge2,
        TextureId::MeteorLarge3,
        TextureId::MeteorLarge4,
        TextureId::MeteorSmall1,
        TextureId::MeteorSmall2,
        TextureId::MeteorSmaller1,
        TextureId::MeteorSmaller2,
        TextureId::MeteorTiny1,
        TextureId::MeteorTiny2,
    ];

    /// Asset path, relative to the game directory
    pub fn path(self) -> &'static str {
        match self {
            TextureId::Background => "assets/nebula.jpg",
            TextureId::Ship => "assets/starshippixelart_rotate_transparant_2.png",
            TextureId::LifeIcon => "assets/starshippixelart_rotate_transparant_small.png",
            TextureId::Bullet => "assets/bullet.png",
            TextureId::MeteorLarge1 => "assets/spaceMeteors_001.png",
            TextureId::MeteorLarge2 => "assets/spaceMeteors_002.png",
            TextureId::MeteorLarge3 => "assets/spaceMeteors_003.png",
            TextureId::MeteorLarge4 => "assets/spaceMeteors_004.png",
            TextureId::MeteorSmall1 => "assets/spaceMeteors_small_001.png",
            TextureId::MeteorSmall2 => "assets/spaceMeteors_small_002.png",
            TextureId::MeteorSmaller1 => "assets/spaceMeteors_smaller_003.png",
            TextureId::MeteorSmaller2 => "assets/spaceMeteors_smaller_004.png",
            TextureId::MeteorTiny1 => "assets/spaceMeteors_tiny_003.png",
            TextureId::MeteorTiny2 => "assets/spaceMeteors_tiny_004.png",
        }
    }

    /// Draw scale applied to the texture's pixel size
    pub fn scale(self) -> f32 {
        match self {
            TextureId::Background => 1.0,
            TextureId::Ship => SPRITE_SCALING,
            TextureId::LifeIcon => SCALE / 3.0,
            TextureId::Bullet
            | TextureId::MeteorLarge1
            | TextureId::MeteorLarge2
            | TextureId::MeteorLarge3
            | TextureId::MeteorLarge4 => SCALE,
            _ => SCALE * 1.5,
        }
    }

    /// Texture for a meteor of `tier`, variant `n` (wraps if out of range)
    pub fn meteor(tier: Tier, n: u8) -> Self {
        let n = n % tier.variant_count();
        match (tier, n) {
            (Tier::Large, 0) => TextureId::MeteorLarge1,
            (Tier::Large, 1) => TextureId::MeteorLarge2,
            (Tier::Large, 2) => TextureId::MeteorLarge3,
            (Tier::Large, _) => TextureId::MeteorLarge4,
            (Tier::Small, 0) => TextureId::MeteorSmall1,
            (Tier::Small, _) => TextureId::MeteorSmall2,
            (Tier::Smaller, 0) => TextureId::MeteorSmaller1,
            (Tier::Smaller, _) => TextureId::MeteorSmaller2,
            (Tier::Tiny, 0) => TextureId::MeteorTiny1,
            (Tier::Tiny, _) => TextureId::MeteorTiny2,
        }
    }
}

/// One textured quad, ready for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 2],
    /// Degrees, counter-clockwise
    pub angle_deg: f32,
    pub scale: f32,
    /// `TextureId` discriminant
    pub texture: u32,
}

impl Entity {
    pub fn texture(&self) -> TextureId {
        match self.kind {
            EntityKind::Player { .. } => TextureId::Ship,
            EntityKind::Asteroid { tier } => TextureId::meteor(tier, self.sprite),
            EntityKind::Bullet => TextureId::Bullet,
            EntityKind::LifeIcon => TextureId::LifeIcon,
        }
    }

    pub fn sprite_instance(&self) -> SpriteInstance {
        let texture = self.texture();
        SpriteInstance {
            center: self.kin.pos.to_array(),
            angle_deg: self.kin.angle,
            scale: texture.scale(),
            texture: texture as u32,
        }
    }
}
