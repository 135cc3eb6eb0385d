//! Surface appearance handed to the external renderer.
//!
//! Textures are referenced by path only; decoding and GPU upload are the
//! renderer's job. A material flagged with `needs_update` must be re-read by
//! the renderer before the next frame.

/// A texture referenced by its path relative to the asset root.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureRef {
    pub path: String,
    /// UV repeat factor, `[1.0, 1.0]` for a single stretched copy.
    pub repeat: [f32; 2],
}

impl TextureRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            repeat: [1.0, 1.0],
        }
    }

    pub fn repeating(path: impl Into<String>, u: f32, v: f32) -> Self {
        Self {
            path: path.into(),
            repeat: [u, v],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub texture: Option<TextureRef>,
    pub tint: [f32; 3],
    pub double_sided: bool,
    pub needs_update: bool,
}

impl Material {
    pub fn textured(texture: TextureRef) -> Self {
        Self {
            texture: Some(texture),
            tint: [1.0, 1.0, 1.0],
            double_sided: true,
            needs_update: true,
        }
    }

    /// Swaps the texture and marks the material for refresh.
    pub fn rebind(&mut self, texture: TextureRef) {
        self.texture = Some(texture);
        self.needs_update = true;
    }
}
