use correios_frete::{
    service, FreteConfig, FreteError, QuoteExecutor, QuoteRequest, ReqwestTransport,
};
use httpmock::prelude::*;
use rust_decimal_macros::dec;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const PATH: &str = "/calculador/CalcPrecoPrazo.aspx";

fn carrier_reply(code: &str, price: &str, error: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="ISO-8859-1" ?>
<Servicos>
  <cServico>
    <Codigo>{code}</Codigo>
    <Valor>{price}</Valor>
    <PrazoEntrega>3</PrazoEntrega>
    <ValorMaoPropria>0,00</ValorMaoPropria>
    <ValorAvisoRecebimento>0,00</ValorAvisoRecebimento>
    <ValorValorDeclarado>0,00</ValorValorDeclarado>
    <EntregaDomiciliar>S</EntregaDomiciliar>
    <EntregaSabado>N</EntregaSabado>
    <Erro>{error}</Erro>
    <MsgErro><![CDATA[{message}]]></MsgErro>
  </cServico>
</Servicos>"#
    )
}

fn sample_request() -> QuoteRequest {
    let mut request = QuoteRequest::new();
    request
        .set_format(1)
        .unwrap()
        .set_origin_postal_code("01310000")
        .set_destination_postal_code("20040020")
        .set_weight(dec!(1.5));
    request
}

#[tokio::test]
async fn test_quote_end_to_end() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PATH)
                .query_param("nCdFormato", "1")
                .query_param("sCepOrigem", "01310000")
                .query_param("sCepDestino", "20040020")
                .query_param("nVlPeso", "1.5")
                .query_param("nCdServico", "40010,41106")
                .query_param("sCdMaoPropria", "N")
                .query_param("StrRetorno", "xml");
            then.status(200)
                .header("Content-Type", "text/xml")
                .body(carrier_reply("40010", "15.90", "0", ""));
        })
        .await;

    let executor = QuoteExecutor::with_endpoint(server.url(PATH), ReqwestTransport::new());
    let result = executor.execute(sample_request()).await.unwrap();

    api_mock.assert_async().await;
    assert!(result.successful);
    assert_eq!(result.price, "15.90");
    assert_eq!(result.service_code, "40010");
    assert_eq!(result.delivery_days, "3");
    assert_eq!(result.error_code, "0");
    assert_eq!(result.error_message, "");
}

#[tokio::test]
async fn test_carrier_soft_error() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200)
                .header("Content-Type", "text/xml")
                .body(carrier_reply("40010", "0,00", "6", "Peso excedido"));
        })
        .await;

    let executor = QuoteExecutor::with_endpoint(server.url(PATH), ReqwestTransport::new());
    let result = executor.execute(sample_request()).await.unwrap();

    api_mock.assert_async().await;
    assert!(!result.successful);
    assert_eq!(result.error_code, "6");
    assert_eq!(result.error_message, "Peso excedido");
    // Partial data still comes through.
    assert_eq!(result.service_code, "40010");
    assert_eq!(result.delivery_days, "3");
    assert_eq!(result.home_delivery, "S");
}

#[tokio::test]
async fn test_non_xml_body_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200)
                .header("Content-Type", "text/plain")
                .body("Servico temporariamente indisponivel");
        })
        .await;

    let executor = QuoteExecutor::with_endpoint(server.url(PATH), ReqwestTransport::new());
    let err = executor.execute(sample_request()).await.unwrap_err();

    assert!(matches!(err, FreteError::Fetch { .. }));
    assert!(err.to_string().contains("error fetching data"));
}

#[tokio::test]
async fn test_http_error_status_propagates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(503);
        })
        .await;

    let executor = QuoteExecutor::with_endpoint(server.url(PATH), ReqwestTransport::new());
    let err = executor.execute(sample_request()).await.unwrap_err();

    match err {
        FreteError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(503)),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    let executor = QuoteExecutor::with_endpoint("http://127.0.0.1:1/calc", ReqwestTransport::new());
    let err = executor.execute(sample_request()).await.unwrap_err();

    assert!(matches!(err, FreteError::Http(_)));
}

#[tokio::test]
async fn test_invalid_setter_never_reaches_network() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(PATH);
            then.status(200).body(carrier_reply("40010", "1,00", "0", ""));
        })
        .await;

    let mut request = sample_request();
    let err = request.set_hand_delivery("X").unwrap_err();
    assert!(err.to_string().contains("S or N"));

    api_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_configured_client_with_shared_transport() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(PATH)
                .query_param("nCdEmpresa", "08082650")
                .query_param("sDsSenha", "segredo")
                .query_param("nCdServico", service::PAC);
            then.status(200)
                .header("Content-Type", "text/xml")
                .body(carrier_reply(service::PAC, "22,10", "010", "CEP sem entrega aos sabados"));
        })
        .await;

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[service]
endpoint = "{}"
timeout_seconds = 5

[credentials]
company_code = "08082650"
password = "segredo"

[defaults]
service_codes = ["{}"]
"#,
        server.url(PATH),
        service::PAC
    )
    .unwrap();

    let config = FreteConfig::from_file(config_file.path()).unwrap();
    let transport = Arc::new(ReqwestTransport::from_config(&config).unwrap());
    let executor = QuoteExecutor::from_config(&config, Arc::clone(&transport));

    let mut request = QuoteRequest::from_config(&config);
    request
        .set_origin_postal_code("05311900")
        .set_destination_postal_code("88015600")
        .set_weight(dec!(0.5));

    let result = executor.execute(request).await.unwrap();

    api_mock.assert_async().await;
    assert!(result.successful);
    assert_eq!(result.service_code, "41106");
    assert_eq!(result.price, "22,10");
    assert_eq!(result.error_message, "CEP sem entrega aos sabados");
}

#[test]
fn test_built_url_contains_every_field() {
    let executor = QuoteExecutor::with_endpoint("http://localhost/calc", ReqwestTransport::new());
    let mut request = sample_request();
    request
        .set_length(dec!(20))
        .set_height(dec!(10))
        .set_width(dec!(15))
        .set_diameter(dec!(0))
        .set_declared_value(dec!(99.9))
        .set_receipt_notice("S")
        .unwrap();

    let url = executor.build_url(&request);
    assert!(url.starts_with("http://localhost/calc?"));
    for field in [
        "nCdEmpresa=",
        "sDsSenha=",
        "nCdServico=40010%2C41106",
        "sCepOrigem=01310000",
        "sCepDestino=20040020",
        "nVlPeso=1.5",
        "nCdFormato=1",
        "nVlComprimento=20",
        "nVlAltura=10",
        "nVlLargura=15",
        "nVlDiametro=0",
        "sCdMaoPropria=N",
        "nVlValorDeclarado=99.9",
        "sCdAvisoRecebimento=S",
        "StrRetorno=xml",
    ] {
        assert!(url.contains(field), "missing {} in {}", field, url);
    }
}
