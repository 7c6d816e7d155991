#![allow(missing_docs)]

use bytes::Bytes;
use futures::stream;
use multipart_feed::{HeaderSet, Multipart, Part};

#[tokio::test]
async fn exposes_metadata_accessors() {
    let body = concat!(
        "--frame\r\n",
        "Content-Type: image/jpeg; quality=80\r\n",
        "X-Timestamp: 1700000000\r\n",
        "X-Timestamp: 1700000001\r\n",
        "Content-Length: 4\r\n",
        "\r\n",
        "\u{ff}\u{d8}",
        "--frame--\r\n"
    );

    let input = stream::iter([Ok::<Bytes, std::io::Error>(Bytes::from_static(body.as_bytes()))]);
    let mut multipart = Multipart::from_stream("multipart/x-mixed-replace; boundary=frame", input)
        .expect("content type should parse");
    let part = multipart
        .next_part()
        .await
        .expect("part should parse")
        .expect("part expected");

    let content_type = part.content_type().expect("mime should parse");
    assert_eq!(content_type.essence_str(), "image/jpeg");
    assert_eq!(
        content_type.get_param("quality").map(|value| value.as_str()),
        Some("80")
    );
    assert_eq!(part.header("x-timestamp"), Some("1700000000"));
    assert_eq!(
        part.header_all("X-Timestamp").collect::<Vec<_>>(),
        vec!["1700000000", "1700000001"]
    );
    assert_eq!(part.content_length(), 4);
    assert_eq!(part.body().as_ref(), "\u{ff}\u{d8}".as_bytes());

    let map = part.to_header_map().expect("headers are valid HTTP");
    assert_eq!(map.get_all("x-timestamp").iter().count(), 2);
}

#[test]
fn text_view_requires_utf8() {
    let part = Part::new(HeaderSet::new(), Bytes::from_static(b"plain text"));
    assert_eq!(part.text().expect("utf-8"), "plain text");

    let part = Part::new(HeaderSet::new(), Bytes::from_static(&[0xff, 0xd8, 0xff]));
    assert!(part.text().is_err());
    assert!(part.content_type().is_none());
}

#[test]
fn unparseable_content_type_is_none() {
    let headers: HeaderSet = [("Content-Type", "not a mime")].into_iter().collect();
    let part = Part::new(headers, Bytes::new());
    assert!(part.content_type().is_none());
}

#[test]
fn parts_split_into_headers_and_body() {
    let headers: HeaderSet = [("Content-Length", "2")].into_iter().collect();
    let part = Part::new(headers.clone(), Bytes::from_static(b"ok"));

    let (split_headers, body) = part.clone().into_parts();
    assert_eq!(split_headers, headers);
    assert_eq!(body, Bytes::from_static(b"ok"));
    assert_eq!(part.into_body(), Bytes::from_static(b"ok"));
}
