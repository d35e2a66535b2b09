use super::*;

fn test_client(base_url: &str) -> WikiClient {
    WikiClient::with_base_url(base_url, "bucketlist-test/0.1", Some(5))
        .expect("client construction should not fail")
}

fn palace() -> Coordinate {
    Coordinate {
        latitude: 51.501,
        longitude: -0.141,
    }
}

#[test]
fn geosearch_url_carries_every_parameter() {
    let client = test_client("https://en.wikipedia.org/w/api.php");
    let url = client.geosearch_url(palace());
    assert_eq!(
        url.as_str(),
        "https://en.wikipedia.org/w/api.php?ggscoord=51.501%7C-0.141&action=query\
         &prop=coordinates%7Cpageimages%7Cpageterms&colimit=50&piprop=thumbnail\
         &pithumbsize=500&pilimit=50&wbptterms=description&generator=geosearch\
         &ggsradius=10000&ggslimit=50&format=json"
    );
}

#[test]
fn geosearch_url_formats_whole_degrees_without_fraction() {
    let client = test_client("https://en.wikipedia.org/w/api.php");
    let url = client.geosearch_url(Coordinate {
        latitude: 50.0,
        longitude: 0.0,
    });
    let coord = url
        .query_pairs()
        .find(|(k, _)| k == "ggscoord")
        .map(|(_, v)| v.into_owned());
    assert_eq!(coord.as_deref(), Some("50|0"));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = WikiClient::with_base_url("not a url", "ua", None);
    assert!(
        matches!(result, Err(WikiError::InvalidBaseUrl { ref url, .. }) if url == "not a url"),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}
