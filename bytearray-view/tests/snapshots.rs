mod common;
use common::{memory_view, Recorder, KEY};

use async_std::test;

use bytearray_view::{ByteArrayView, Options, Slice};
use range_memory::RangeMemory;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[test]
pub async fn snapshots_scenario() {
    let mut view = memory_view(&RangeMemory::new(), 16).await;
    view.set(0, &[0xff]).await.unwrap();
    view.set_slice(2..6, &[1, 2, 3, 4]).await.unwrap();
    view.set_slice(Slice::from(8..16).with_step(3), &[0xa, 0xb, 0xc]).await.unwrap();
    view.set(-1, &[0xee]).await.unwrap();

    insta::assert_snapshot!(hex(&view.to_vec().await.unwrap()), @"ff000102030400000a00000b00000cee");
    insta::assert_snapshot!(view.to_string(), @"ByteArrayView(key=mybytearray, length=16)");
}

#[test]
pub async fn snapshots_calls() {
    let recorder = Recorder::new(RangeMemory::new());
    let mut view = ByteArrayView::open_with(recorder.clone(), KEY, Options::new(8))
        .await.unwrap();
    view.set_slice(Slice::default().with_step(-3), &[1, 2, 3]).await.unwrap();
    view.get_slice(Slice::from(1..).with_step(2)).await.unwrap();

    insta::assert_debug_snapshot!(recorder.calls(), @r###"
    [
        Get,
        Set(
            8,
        ),
        SetRange(
            1,
            [
                3,
            ],
        ),
        SetRange(
            4,
            [
                2,
            ],
        ),
        SetRange(
            7,
            [
                1,
            ],
        ),
        GetRange(
            1,
            7,
        ),
    ]
    "###);
}
