use super::*;
use crate::error::ValidationReason;
use crate::marshal::{marshal, unmarshal};
use crate::value::{host_map, HostMap, HostValue};

fn sample_config() -> Config {
    Config {
        breezserver: "https://bs1.breez.technology:443".to_owned(),
        mempoolspace_url: "https://mempool.space".to_owned(),
        working_dir: "/data/breez".to_owned(),
        network: Network::Bitcoin,
        payment_timeout_sec: 60,
        default_lsp_id: Some("03cea51f-b654-4fb0-8e82-eca137f236a0".to_owned()),
        api_key: None,
        maxfee_percent: 1.0,
        exemptfee_msat: 20_000,
        node_config: NodeConfig::Greenlight {
            config: GreenlightNodeConfig {
                partner_credentials: Some(GreenlightCredentials {
                    device_key: vec![1, 2, 3],
                    device_cert: vec![4, 5, 6],
                }),
                invite_code: None,
            },
        },
    }
}

fn as_args(value: HostValue) -> HostMap {
    match value {
        HostValue::Map(map) => map,
        other => panic!("expected map, got {other}"),
    }
}

#[test]
fn config_returned_by_core_is_accepted_as_request_argument() {
    let config = sample_config();
    let encoded = unmarshal(&config).expect("encode config");
    assert_eq!(encoded.get("network"), Some(&HostValue::from("bitcoin")));
    assert_eq!(encoded.get("apiKey"), Some(&HostValue::Null));
    let node_config = encoded.get("nodeConfig").expect("node config");
    assert_eq!(node_config.get("type"), Some(&HostValue::from("greenlight")));

    let decoded: Config = marshal(&as_args(encoded)).expect("config round trip");
    assert_eq!(decoded, config);
}

#[test]
fn lnurl_pay_data_round_trips_from_parse_input_result() {
    let data = LnUrlPayRequestData {
        callback: "https://lnurl.example/pay/cb".to_owned(),
        min_sendable: 1_000,
        max_sendable: 100_000_000,
        metadata_str: "[[\"text/plain\",\"coffee\"]]".to_owned(),
        comment_allowed: 144,
        domain: "lnurl.example".to_owned(),
        ln_address: Some("barista@lnurl.example".to_owned()),
    };
    let parsed = unmarshal(&InputType::LnUrlPay { data: data.clone() }).expect("encode input");
    assert_eq!(parsed.get("type"), Some(&HostValue::from("lnUrlPay")));

    let args = host_map([
        ("data", parsed.get("data").cloned().unwrap_or_default()),
        ("amountMsat", HostValue::UInt(5_000)),
    ]);
    let request: LnUrlPayRequest = marshal(&args).expect("lnurl pay request");
    assert_eq!(request.data, data);
    assert_eq!(request.comment, None);
}

#[test]
fn lnurl_pay_reports_nested_field_path() {
    let args = host_map([
        ("data", HostValue::Map(host_map([("callback", "https://x")]))),
        ("amountMsat", HostValue::UInt(1)),
    ]);
    let err = marshal::<LnUrlPayRequest>(&args).expect_err("incomplete data");
    let validation = err.validation().expect("validation");
    assert_eq!(validation.field, "data.minSendable");
    assert_eq!(validation.operation, "LnUrlPayRequest");
}

#[test]
fn receive_payment_preimage_must_be_32_bytes() {
    let base = |preimage: HostValue| {
        host_map([
            ("amountMsat", HostValue::UInt(3_000)),
            ("description", HostValue::from("latte")),
            ("preimage", preimage),
        ])
    };

    let request: ReceivePaymentRequest =
        marshal(&base(HostValue::Bytes(vec![7; 32]))).expect("valid");
    assert_eq!(request.preimage, Some(vec![7; 32]));

    let request: ReceivePaymentRequest = marshal(&base(HostValue::Null)).expect("absent preimage");
    assert_eq!(request.preimage, None);

    let err = marshal::<ReceivePaymentRequest>(&base(HostValue::Bytes(vec![7; 33])))
        .expect_err("too long");
    assert_eq!(err.validation().map(|v| v.field.as_str()), Some("preimage"));
}

#[test]
fn keysend_tlvs_decode_from_number_lists() {
    let args = host_map([
        (
            "nodeId",
            HostValue::from("02eec7245d6b7d2ccb30380bfbe2a3648cd7a942653f5aa340edcea1f283686619"),
        ),
        ("amountMsat", HostValue::Float(10_000.0)),
        (
            "extraTlvs",
            HostValue::List(vec![HostValue::Map(host_map([
                ("fieldNumber", HostValue::UInt(5_482_373_484)),
                ("value", HostValue::List(vec![HostValue::UInt(0xde), HostValue::UInt(0xad)])),
            ]))]),
        ),
    ]);
    let request: SendSpontaneousPaymentRequest = marshal(&args).expect("keysend");
    let tlvs = request.extra_tlvs.expect("tlvs");
    assert_eq!(tlvs[0].value, vec![0xde, 0xad]);
    assert_eq!(request.amount_msat, 10_000);
}

#[test]
fn payment_details_carry_type_discriminant() {
    let payment = Payment {
        id: "hash".to_owned(),
        payment_type: PaymentType::ClosedChannel,
        payment_time: 1_700_000_000,
        amount_msat: 5_000_000,
        fee_msat: 0,
        status: PaymentStatus::Complete,
        error: None,
        description: Some("Closed Channel".to_owned()),
        details: PaymentDetails::ClosedChannel {
            data: ClosedChannelPaymentDetails {
                short_channel_id: "812x1x0".to_owned(),
                state: ChannelState::Closed,
                funding_txid: "ab".repeat(32),
            },
        },
    };
    let encoded = unmarshal(&payment).expect("encode payment");
    let details = encoded.get("details").expect("details");
    assert_eq!(details.get("type"), Some(&HostValue::from("closedChannel")));
    assert_eq!(
        details.get("data").and_then(|data| data.get("shortChannelId")),
        Some(&HostValue::from("812x1x0"))
    );
    assert_eq!(encoded.get("paymentType"), Some(&HostValue::from("closedChannel")));
}

#[test]
fn list_payment_filters_are_canonicalized() {
    let args = host_map([(
        "filters",
        HostValue::List(vec![HostValue::from("Sent"), HostValue::from("CLOSEDCHANNEL")]),
    )]);
    let request: ListPaymentsRequest = marshal(&args).expect("filters");
    let expected = vec![PaymentTypeFilter::Sent, PaymentTypeFilter::ClosedChannel];
    assert_eq!(request.filters, Some(expected));
}

#[test]
fn fee_percent_beyond_double_precision_is_rejected() {
    let mut args = as_args(unmarshal(&sample_config()).expect("encode config"));
    args.insert("maxfeePercent".to_owned(), HostValue::UInt(9_007_199_254_740_993));
    let err = schemas::CONFIG.validate(&args).expect_err("2^53 + 1");
    assert_eq!(err.field, "maxfeePercent");
    assert_eq!(err.reason, ValidationReason::OutOfRange { expected: "number" });

    args.insert("maxfeePercent".to_owned(), HostValue::UInt(3));
    let config: Config = marshal(&args).expect("small integers are exact");
    assert_eq!(config.maxfee_percent, 3.0);
}

#[test]
fn lnurl_callback_status_is_tagged() {
    let ok = unmarshal(&LnUrlCallbackStatus::Ok).expect("encode ok");
    assert_eq!(ok, HostValue::Map(host_map([("type", "ok")])));

    let failed = LnUrlCallbackStatus::ErrorStatus {
        data: LnUrlErrorData { reason: "k1 expired".to_owned() },
    };
    let encoded = unmarshal(&failed).expect("encode error status");
    assert_eq!(encoded.get("type"), Some(&HostValue::from("errorStatus")));
    let reason = encoded.get("data").and_then(|data| data.get("reason"));
    assert_eq!(reason, Some(&HostValue::from("k1 expired")));
}

#[test]
fn withdraw_request_reports_nested_bounds_by_path() {
    let data = LnUrlWithdrawRequestData {
        callback: "https://faucet.example/withdraw".to_owned(),
        k1: "37b4c919f871c090830cc47b92a544a2".to_owned(),
        default_description: "faucet".to_owned(),
        min_withdrawable: 1_000,
        max_withdrawable: 50_000,
    };
    let mut data = as_args(unmarshal(&data).expect("encode data"));
    data.insert("maxWithdrawable".to_owned(), HostValue::Int(-1));
    let args =
        host_map([("data", HostValue::Map(data)), ("amountMsat", HostValue::from(2_000u64))]);
    let err = marshal::<LnUrlWithdrawRequest>(&args).expect_err("negative bound");
    let err = err.validation().expect("validation failure");
    assert_eq!(err.field, "data.maxWithdrawable");
    assert_eq!(err.operation, "LnUrlWithdrawRequest");
}

#[test]
fn buy_bitcoin_provider_is_case_insensitive() {
    let request: BuyBitcoinRequest =
        marshal(&host_map([("provider", "MoonPay")])).expect("provider");
    assert_eq!(request.provider, BuyBitcoinProvider::Moonpay);

    let err = marshal::<BuyBitcoinRequest>(&host_map([("provider", "ramp")]))
        .expect_err("unsupported provider");
    assert!(err.to_string().contains("moonpay"), "{err}");
}
