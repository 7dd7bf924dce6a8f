//! Canvas 2D backend
//!
//! Owns the drawing context and the three sprite images. Images load in the
//! background; a failed image is logged and never drawn.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::frame::{DrawCmd, Frame};
use super::sprites::{LoadStatus, SheetId, SpriteAtlas};
use crate::error::MountError;
use crate::tuning::Tuning;

struct SheetImage {
    id: SheetId,
    image: HtmlImageElement,
    // Kept alive for as long as the image can fire
    _on_load: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl Drop for SheetImage {
    fn drop(&mut self) {
        // The element may still be loading; it must not call into freed closures
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sheets: Vec<SheetImage>,
    atlas: Rc<RefCell<SpriteAtlas>>,
}

impl CanvasRenderer {
    /// Size the canvas to the logical field and start loading sprites from
    /// `asset_base`. `on_change` runs after every image settles.
    pub fn new(
        canvas: &HtmlCanvasElement,
        tuning: &Tuning,
        asset_base: &str,
        on_change: Rc<dyn Fn()>,
    ) -> Result<Self, MountError> {
        canvas.set_width(tuning.field_width as u32);
        canvas.set_height(tuning.field_height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into().ok())
            .ok_or(MountError::ContextUnavailable)?;

        let atlas = Rc::new(RefCell::new(SpriteAtlas::new()));
        let mut sheets = Vec::with_capacity(SheetId::ALL.len());
        for id in SheetId::ALL {
            match load_sheet(id, asset_base, atlas.clone(), on_change.clone()) {
                Ok(sheet) => sheets.push(sheet),
                Err(e) => {
                    log::warn!("Could not create image for {:?}: {:?}", id, e);
                    atlas.borrow_mut().set_status(id, LoadStatus::Failed);
                }
            }
        }

        Ok(Self { ctx, sheets, atlas })
    }

    /// Snapshot of which sheets are drawable
    pub fn atlas(&self) -> SpriteAtlas {
        *self.atlas.borrow()
    }

    /// Replay a draw list
    pub fn draw(&self, frame: &Frame) {
        for cmd in &frame.cmds {
            match cmd {
                DrawCmd::Clear { w, h } => {
                    self.ctx.clear_rect(0.0, 0.0, f64::from(*w), f64::from(*h));
                }
                DrawCmd::FillRect { rect, color } => {
                    self.ctx.set_fill_style_str(color);
                    self.ctx.fill_rect(
                        f64::from(rect.x),
                        f64::from(rect.y),
                        f64::from(rect.w),
                        f64::from(rect.h),
                    );
                }
                DrawCmd::Sprite { sheet, src, dst } => {
                    let Some(image) = self.sheets.iter().find(|s| s.id == *sheet) else {
                        continue;
                    };
                    let result = self
                        .ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            &image.image,
                            f64::from(src.x),
                            f64::from(src.y),
                            f64::from(src.w),
                            f64::from(src.h),
                            f64::from(dst.x),
                            f64::from(dst.y),
                            f64::from(dst.w),
                            f64::from(dst.h),
                        );
                    if let Err(e) = result {
                        log::warn!("drawImage {:?} failed: {:?}", sheet, e);
                    }
                }
            }
        }
    }
}

fn load_sheet(
    id: SheetId,
    asset_base: &str,
    atlas: Rc<RefCell<SpriteAtlas>>,
    on_change: Rc<dyn Fn()>,
) -> Result<SheetImage, JsValue> {
    let image = HtmlImageElement::new()?;
    let url = format!("{}/{}", asset_base.trim_end_matches('/'), id.file_name());

    let on_load = {
        let atlas = atlas.clone();
        let on_change = on_change.clone();
        Closure::<dyn FnMut()>::new(move || {
            atlas.borrow_mut().set_status(id, LoadStatus::Loaded);
            log::debug!("Loaded sprite sheet {:?}", id);
            on_change();
        })
    };
    let on_error = {
        let url = url.clone();
        Closure::<dyn FnMut()>::new(move || {
            atlas.borrow_mut().set_status(id, LoadStatus::Failed);
            log::warn!("Sprite sheet {} failed to load; it will not be drawn", url);
            on_change();
        })
    };
    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(&url);

    Ok(SheetImage {
        id,
        image,
        _on_load: on_load,
        _on_error: on_error,
    })
}
