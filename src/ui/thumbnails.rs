//! Catalog thumbnails: decoded from the pixmaps directory and registered with egui.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{EguiTextureHandle, EguiUserTextures, egui};

use crate::config::AppConfig;
use crate::constants::{ITEM_IMAGE_SIZE, MAX_THUMBNAILS_PER_FRAME};
use crate::editor::EditorPanel;

/// Edge length of decoded thumbnails in pixels
pub const THUMBNAIL_SIZE: u32 = ITEM_IMAGE_SIZE as u32;

/// Thumbnails keyed by catalog image id.
#[derive(Resource, Default)]
pub struct ThumbnailCache {
    /// Pixmaps directory the cached images were read from
    root: Option<PathBuf>,
    thumbnails: HashMap<String, Handle<Image>>,
    texture_ids: HashMap<String, egui::TextureId>,
    failed: HashSet<String>,
    placeholder: Option<(Handle<Image>, egui::TextureId)>,
}

impl ThumbnailCache {
    pub fn texture_id(&self, image_id: &str) -> Option<egui::TextureId> {
        self.texture_ids.get(image_id).copied()
    }

    pub fn has_failed(&self, image_id: &str) -> bool {
        self.failed.contains(image_id)
    }

    /// Texture shown for graphics that could not be decoded
    pub fn placeholder(&self) -> Option<egui::TextureId> {
        self.placeholder.as_ref().map(|(_, id)| *id)
    }

    fn is_pending(&self, image_id: &str) -> bool {
        !self.thumbnails.contains_key(image_id) && !self.failed.contains(image_id)
    }

    /// Forget everything read from a previous pixmaps directory.
    fn reset_for(&mut self, root: &Path) {
        if self.root.as_deref() == Some(root) {
            return;
        }
        self.thumbnails.clear();
        self.texture_ids.clear();
        self.failed.clear();
        self.root = Some(root.to_path_buf());
    }
}

/// Decode a graphic and shrink it to thumbnail size.
pub fn load_thumbnail(path: &Path) -> Option<Image> {
    let decoded = match image::open(path) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Failed to decode {:?}: {}", path, e);
            return None;
        }
    };
    let rgba = decoded.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    ))
}

/// A dark square with a red X, shown where a graphic failed to load.
pub fn create_placeholder_image() -> Image {
    let size = THUMBNAIL_SIZE as usize;
    let mut data = vec![0u8; size * size * 4];

    let red: [u8; 4] = [200, 50, 50, 255];
    let dark: [u8; 4] = [50, 50, 50, 255];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let on_diagonal = x.abs_diff(y) <= 1 || (size - 1 - x).abs_diff(y) <= 1;
            let color = if on_diagonal { red } else { dark };
            data[idx..idx + 4].copy_from_slice(&color);
        }
    }

    Image::new(
        Extent3d {
            width: THUMBNAIL_SIZE,
            height: THUMBNAIL_SIZE,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Startup system registering the placeholder texture.
pub fn setup_placeholder_texture(
    mut cache: ResMut<ThumbnailCache>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let handle = images.add(create_placeholder_image());
    let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
    cache.placeholder = Some((handle, texture_id));
}

/// Loads thumbnails for the installed catalog and registers them with egui.
/// Runs in Update before the egui pass.
pub fn load_and_register_thumbnails(
    panel: Res<EditorPanel>,
    config: Res<AppConfig>,
    mut cache: ResMut<ThumbnailCache>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let Some(catalog) = panel.catalog() else {
        return;
    };

    let root = config.data.pixmaps_dir();
    cache.reset_for(&root);

    // The selected category first, so what is on screen fills in soonest
    let selected = panel.selected_panel().map(|(_, items)| items);
    let to_load: Vec<(String, String)> = selected
        .into_iter()
        .chain(catalog.panels())
        .flat_map(|items| items.items())
        .filter(|item| cache.is_pending(&item.image_id))
        .map(|item| (item.image_id.clone(), item.image_path.clone()))
        .fold(Vec::new(), |mut acc, entry| {
            if acc.len() < MAX_THUMBNAILS_PER_FRAME && !acc.contains(&entry) {
                acc.push(entry);
            }
            acc
        });

    for (image_id, image_path) in to_load {
        match load_thumbnail(&root.join(&image_path)) {
            Some(image) => {
                let handle = images.add(image);
                cache.thumbnails.insert(image_id, handle);
            }
            None => {
                cache.failed.insert(image_id);
            }
        }
    }

    let to_register: Vec<String> = cache
        .thumbnails
        .keys()
        .filter(|id| !cache.texture_ids.contains_key(*id))
        .cloned()
        .collect();

    for image_id in to_register {
        if let Some(handle) = cache.thumbnails.get(&image_id) {
            let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
            cache.texture_ids.insert(image_id, texture_id);
        }
    }
}
