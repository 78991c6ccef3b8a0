//! 二维码服务 - 业务能力层
//!
//! 给定文本，返回 PNG 图片字节，或可直接嵌入页面的 data URI。

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;

use crate::error::{AppError, AppResult};

/// 二维码最小边长（像素）
const MIN_DIMENSION: u32 = 250;

/// 二维码服务
pub struct QrService;

impl QrService {
    /// 生成 PNG 字节
    pub fn png(text: &str) -> AppResult<Vec<u8>> {
        let code = QrCode::new(text.as_bytes()).map_err(|e| AppError::Qr(e.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(MIN_DIMENSION, MIN_DIMENSION)
            .build();

        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(image)
            .write_to(&mut buf, ImageOutputFormat::Png)
            .map_err(|e| AppError::Qr(e.to_string()))?;
        Ok(buf.into_inner())
    }

    /// 生成 `data:image/png;base64,...`
    pub fn data_uri(text: &str) -> AppResult<String> {
        let png = Self::png(text)?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}
