#![allow(missing_docs)]

#[cfg(feature = "hyper")]
use bytes::Bytes;
#[cfg(feature = "hyper")]
use http_body_util::Full;
#[cfg(feature = "hyper")]
use hyper::{header, Response};
#[cfg(feature = "hyper")]
use multipart_feed::{
    hyper::{content_type_from_response, multipart_from_response},
    MultipartError, ParseError,
};

#[cfg(feature = "hyper")]
#[tokio::test]
async fn multipart_from_response_reads_hyper_body() {
    let body = concat!(
        "--frame\r\n",
        "Content-Type: image/jpeg\r\n",
        "Content-Length: 3\r\n",
        "\r\n",
        "abc\r\n",
        "--frame--\r\n"
    );
    let response = Response::builder()
        .header(header::CONTENT_TYPE, "multipart/x-mixed-replace; boundary=frame")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .expect("response should build");

    assert_eq!(
        content_type_from_response(&response).expect("content type exists"),
        "multipart/x-mixed-replace; boundary=frame"
    );

    let mut multipart = multipart_from_response(response).expect("multipart should initialize");
    let part = multipart
        .next_part()
        .await
        .expect("part parse should succeed")
        .expect("part should exist");

    assert_eq!(part.header("content-type"), Some("image/jpeg"));
    assert_eq!(part.body(), "abc");
    assert!(multipart.next_part().await.expect("clean close").is_none());
}

#[cfg(feature = "hyper")]
#[test]
fn missing_content_type_is_rejected() {
    let response = Response::new(Full::new(Bytes::new()));

    let result = multipart_from_response(response);
    assert!(matches!(
        result,
        Err(MultipartError::Parse(ParseError::InvalidContentType { .. }))
    ));
}
