#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // First 3 bytes pick the geometry, the rest paints pixels as (x, y, r, g, b, a) tuples.
    let [w, h, flags, rest @ ..] = data else {
        return;
    };
    let Ok(mut canvas) = Canvas::new(u32::from(*w), u32::from(*h), flags & 1 == 1) else {
        assert!(*w == 0 || *h == 0);
        return;
    };

    for op in rest.chunks_exact(6) {
        let (x, y) = (u32::from(op[0]), u32::from(op[1]));
        let result = canvas.set_pixel_rgba(x, y, op[2], op[3], op[4], op[5]);
        assert_eq!(result.is_ok(), x < canvas.width() && y < canvas.height());
    }

    let layout = *canvas.layout();
    assert_eq!(layout.stride() % 4, 0);
    assert!(layout.stride() >= layout.row_bytes());

    let encoded = canvas.to_bytes();
    assert_eq!(encoded.len(), layout.file_size());
    assert_eq!(&encoded[0..2], b"BM");
    let colors_used = u32::from_le_bytes([encoded[46], encoded[47], encoded[48], encoded[49]]);
    assert_eq!(colors_used as usize, canvas.unique_color_count());
    assert_eq!(canvas.encode(enough::Unstoppable).unwrap(), encoded);
});
