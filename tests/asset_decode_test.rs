use std::path::PathBuf;

use flow_tunnel::resources::{PixelFormat, TextureSlot, decode_image};

fn asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[tokio::test]
async fn shipped_textures_decode_as_rgb() {
    for slot in TextureSlot::ALL {
        let decoded = decode_image(&asset_dir().join(slot.file_name()))
            .await
            .unwrap_or_else(|e| panic!("{}: {e:#}", slot.file_name()));
        assert_eq!((decoded.width, decoded.height), (64, 64));
        assert_eq!(decoded.components, 3);
        assert_eq!(decoded.format, PixelFormat::Rgb);
        assert_eq!(decoded.pixels().len(), 64 * 64 * 3);
    }
}

#[tokio::test]
async fn textures_are_not_blank() {
    for slot in TextureSlot::ALL {
        let decoded = decode_image(&asset_dir().join(slot.file_name())).await.unwrap();
        let first = &decoded.pixels()[..3];
        let varied = decoded.pixels().chunks(3).any(|px| px != first);
        assert!(varied, "{} is a single colour", slot.file_name());
    }
}
