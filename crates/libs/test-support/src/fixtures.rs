use breez_bridge::types::{
    BitcoinAddressData, BuyBitcoinProvider, BuyBitcoinRequest, CheckMessageRequest, Config,
    ConnectLspRequest, ConnectRequest, CreateOfferRequest, CurrencyInfo, DefaultConfigRequest,
    EnvironmentType, ExecuteCommandRequest, FetchLspInfoRequest, FiatCurrency,
    GreenlightCredentials, GreenlightNodeConfig, ListPaymentsRequest, LnInvoice,
    LnPaymentDetails, LnUrlAuthRequestData, LnUrlPayRequest, LnUrlPayRequestData,
    LnUrlWithdrawRequest, LnUrlWithdrawRequestData, LocalizedName, LspInformation,
    MnemonicToSeedRequest, Network, NodeConfig, NodeState, ParseInputRequest, ParseInvoiceRequest,
    PayOfferRequest, Payment, PaymentByHashRequest, PaymentDetails, PaymentStatus, PaymentType,
    PaymentTypeFilter, PrepareSweepRequest, Rate, ReceivePaymentRequest, RecommendedFees,
    RefundRequest, ReverseSwapPairInfo, RouteHint, RouteHintHop, SendOnchainRequest,
    SendPaymentRequest, SendSpontaneousPaymentRequest, SignMessageRequest, SwapInfo, SwapStatus,
    Symbol, TlvEntry,
};
use breez_bridge::{unmarshal, HostMap, HostValue};
use serde_json::Value as JsonValue;

pub const NODE_ID: &str = "02eadbd9e7557375161df8b646776a547c5cbc2e95b3071ec81553f8ec2cea3b8c";
pub const LSP_ID: &str = "03cea51f-b654-4fb0-8e82-eca137f236a0";
pub const BOLT11: &str = concat!(
    "lnbc110n1p38q3gtpp5ypz09jrd8p993snjwnm68cph4ftwp22le34xd4r8ftspwshxhmnsdqqxqyjw5",
    "qcqpxsp5htlg8ydpywvsa7h3u4hdn77ehs4z4e844em0apjyvmqfkzqhhd2q9qgsqqqyssqszpxzxt9u",
    "uqzymr7zxcdccj5g69s8q7zzjs7sgxn9ejhnvdh6gqjcy22mss2yexunagm5r2gqczh8k24cwrqml3nj",
    "skm548aruhpwssq9nvrvz",
);
pub const PAYMENT_HASH: &str = "2044f2c86d384a58c27274f7a3e037aa56e0a95fcc6a66d4674ae0174ae6bee7";
pub const SWAP_ADDRESS: &str = "bc1qu9rxvq3vqxnvdh6vsah4qdmyrvqxl2e9jmsnx8";
pub const REFUND_SWAP_ADDRESS: &str = "bc1q4h7x8jstnc8w3zz5nwx7rfaymysl0hp4y3udc4";
pub const SWEEP_ADDRESS: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";
pub const CLOSING_TXID: &str = "a1075db55d416d3ca199f55b6084e2115b9345e16c5cf302fc80e9d5fbf5d48d";
pub const OFFER: &str = concat!(
    "lno1qgsqvgnwgcg35z6ee2h3yczraddm72xrfua9uve2rlrm9deu7xyfzrc2z3jxjmnpd3shgegzpesk",
    "6mm0d4jhyun9wphxzmtwypkxjar9wvs9gmmw",
);

/// Node configuration the mock core returns from `defaultConfig`.
pub fn config() -> Config {
    Config {
        breezserver: "https://bs1.breez.technology:443".to_owned(),
        mempoolspace_url: "https://mempool.space".to_owned(),
        working_dir: "/tmp/breez".to_owned(),
        network: Network::Bitcoin,
        payment_timeout_sec: 60,
        default_lsp_id: Some(LSP_ID.to_owned()),
        api_key: None,
        maxfee_percent: 1.0,
        exemptfee_msat: 20_000,
        node_config: greenlight(),
    }
}

pub fn greenlight() -> NodeConfig {
    NodeConfig::Greenlight {
        config: GreenlightNodeConfig { partner_credentials: None, invite_code: None },
    }
}

pub fn invoice(bolt11: &str) -> LnInvoice {
    LnInvoice {
        bolt11: bolt11.to_owned(),
        network: Network::Bitcoin,
        payee_pubkey: NODE_ID.to_owned(),
        payment_hash: PAYMENT_HASH.to_owned(),
        description: Some("coffee".to_owned()),
        description_hash: None,
        amount_msat: Some(11_000),
        timestamp: 1_664_379_112,
        expiry: 604_800,
        routing_hints: vec![RouteHint {
            hops: vec![RouteHintHop {
                src_node_id: NODE_ID.to_owned(),
                short_channel_id: 816_102_906_945_863_681,
                fees_base_msat: 1_000,
                fees_proportional_millionths: 100,
                cltv_expiry_delta: 144,
                htlc_minimum_msat: Some(1),
                htlc_maximum_msat: None,
            }],
        }],
        payment_secret: vec![7; 32],
        min_final_cltv_expiry_delta: 18,
    }
}

pub fn lnurl_pay_data() -> LnUrlPayRequestData {
    LnUrlPayRequestData {
        callback: "https://pay.example.com/lnurlp/alice/callback".to_owned(),
        min_sendable: 1_000,
        max_sendable: 100_000_000,
        metadata_str: r#"[["text/plain","Pay alice"]]"#.to_owned(),
        comment_allowed: 140,
        domain: "pay.example.com".to_owned(),
        ln_address: Some("alice@pay.example.com".to_owned()),
    }
}

pub fn bitcoin_address(address: &str) -> BitcoinAddressData {
    BitcoinAddressData {
        address: address.to_owned(),
        network: Network::Bitcoin,
        amount_sat: None,
        label: None,
        message: None,
    }
}

/// A completed outgoing lightning payment.
pub fn payment(id: &str, amount_msat: u64) -> Payment {
    Payment {
        id: id.to_owned(),
        payment_type: PaymentType::Sent,
        payment_time: 1_700_000_000,
        amount_msat,
        fee_msat: 2_000,
        status: PaymentStatus::Complete,
        error: None,
        description: Some("coffee".to_owned()),
        details: PaymentDetails::Ln {
            data: LnPaymentDetails {
                payment_hash: id.to_owned(),
                label: String::new(),
                destination_pubkey: NODE_ID.to_owned(),
                payment_preimage: "00".repeat(32),
                keysend: false,
                bolt11: BOLT11.to_owned(),
                lnurl_success_action: None,
                ln_address: None,
                lnurl_metadata: None,
            },
        },
    }
}

pub fn node_state() -> NodeState {
    NodeState {
        id: NODE_ID.to_owned(),
        block_height: 815_000,
        channels_balance_msat: 250_000_000,
        onchain_balance_msat: 0,
        max_payable_msat: 240_000_000,
        max_receivable_msat: 4_000_000_000,
        max_single_payment_amount_msat: 4_294_967_000,
        max_chan_reserve_msats: 10_000_000,
        connected_peers: vec![NODE_ID.to_owned()],
        inbound_liquidity_msats: 3_750_000_000,
        ..NodeState::default()
    }
}

pub fn lsp() -> LspInformation {
    LspInformation {
        id: LSP_ID.to_owned(),
        name: "Breez LSP".to_owned(),
        widget_url: String::new(),
        pubkey: NODE_ID.to_owned(),
        host: "lsp.breez.technology:9735".to_owned(),
        base_fee_msat: 1_000,
        fee_rate: 0.000_001,
        time_lock_delta: 144,
        min_htlc_msat: 600,
        lsp_pubkey: vec![2; 33],
    }
}

pub fn recommended_fees() -> RecommendedFees {
    RecommendedFees {
        fastest_fee: 24,
        half_hour_fee: 18,
        hour_fee: 12,
        economy_fee: 6,
        minimum_fee: 2,
    }
}

pub fn lnurl_withdraw_data() -> LnUrlWithdrawRequestData {
    LnUrlWithdrawRequestData {
        callback: "https://faucet.example.com/lnurlw/callback".to_owned(),
        k1: "37b4c919f871c090830cc47b92a544a2".to_owned(),
        default_description: "faucet".to_owned(),
        min_withdrawable: 1_000,
        max_withdrawable: 50_000,
    }
}

pub fn lnurl_auth_data() -> LnUrlAuthRequestData {
    LnUrlAuthRequestData {
        k1: "e2af6254a8df433264fa23f67eb8188635d15ce883e8fc020989d5f82ae6f11e".to_owned(),
        action: Some("login".to_owned()),
        domain: "site.example.com".to_owned(),
        url: "https://site.example.com/lnurl-login".to_owned(),
    }
}

/// A swap-in at `address`, funded or not depending on `status`.
pub fn swap_info(address: &str, status: SwapStatus) -> SwapInfo {
    SwapInfo {
        bitcoin_address: address.to_owned(),
        created_at: 1_700_000_000,
        lock_height: 815_288,
        payment_hash: vec![4; 32],
        public_key: vec![2; 33],
        swapper_public_key: vec![3; 33],
        script: vec![0xa9; 40],
        bolt11: None,
        paid_msat: 0,
        confirmed_sats: 0,
        unconfirmed_sats: 0,
        status,
        refund_tx_ids: Vec::new(),
        confirmed_tx_ids: Vec::new(),
        min_allowed_deposit: 1_000,
        max_allowed_deposit: 4_000_000,
        last_redeem_error: None,
    }
}

pub fn reverse_swap_pair_info() -> ReverseSwapPairInfo {
    ReverseSwapPairInfo {
        min: 50_000,
        max: 4_000_000,
        fees_hash: "f3e0a8a7c6b2".to_owned(),
        fees_percentage: 0.5,
        fees_lockup: 1_200,
        fees_claim: 800,
    }
}

pub fn fiat_rates() -> Vec<Rate> {
    vec![
        Rate { coin: "USD".to_owned(), value: 64_250.5 },
        Rate { coin: "EUR".to_owned(), value: 59_120.0 },
    ]
}

pub fn fiat_currencies() -> Vec<FiatCurrency> {
    vec![FiatCurrency {
        id: "USD".to_owned(),
        info: CurrencyInfo {
            name: "United States Dollar".to_owned(),
            fraction_size: 2,
            spacing: None,
            symbol: Some(Symbol {
                grapheme: Some("$".to_owned()),
                template: Some("$1".to_owned()),
                rtl: Some(false),
                position: Some(0),
            }),
            uniq_symbol: None,
            localized_name: Some(vec![LocalizedName {
                locale: "es".to_owned(),
                name: "Dólar estadounidense".to_owned(),
            }]),
            locale_overrides: None,
        },
    }]
}

/// Host arguments for `request`, exactly as a host would pass them.
pub fn args<T: serde::Serialize>(request: &T) -> HostMap {
    match unmarshal(request) {
        Ok(HostValue::Map(map)) => map,
        other => panic!("fixture request is not a map: {other:?}"),
    }
}

/// Like [`args`], as the JSON object text a JSON host would pass.
pub fn json_args<T: serde::Serialize>(request: &T) -> String {
    HostValue::Map(args(request)).to_json().to_string()
}

pub fn connect_args() -> HostMap {
    let seed = hex::decode(crate::TEST_SEED_HEX).expect("fixture seed hex");
    args(&ConnectRequest { config: config(), seed, restore_only: None })
}

/// Valid arguments for every operation the bridge exposes, with each
/// optional field populated so nested schemas get exercised too.
pub fn valid_args(operation: &str) -> Option<HostMap> {
    let map = match operation {
        "connect" => connect_args(),
        "mnemonicToSeed" => {
            args(&MnemonicToSeedRequest { phrase: crate::TEST_MNEMONIC.to_owned() })
        }
        "parseInput" => args(&ParseInputRequest { input: BOLT11.to_owned() }),
        "parseInvoice" => args(&ParseInvoiceRequest { invoice: BOLT11.to_owned() }),
        "defaultConfig" => args(&DefaultConfigRequest {
            env_type: EnvironmentType::Production,
            api_key: "breez-api-key".to_owned(),
            node_config: NodeConfig::Greenlight {
                config: GreenlightNodeConfig {
                    partner_credentials: Some(GreenlightCredentials {
                        device_key: vec![1; 32],
                        device_cert: b"-----BEGIN CERTIFICATE-----".to_vec(),
                    }),
                    invite_code: Some("XYZ-123".to_owned()),
                },
            },
        }),
        "disconnect" | "sync" | "nodeInfo" | "listLsps" | "backup" | "backupStatus"
        | "recommendedFees" | "receiveOnchain" | "inProgressSwap" | "listRefundables"
        | "fetchReverseSwapFees" | "inProgressReverseSwaps" | "fetchFiatRates"
        | "listFiatCurrencies" | "lspId" | "closeLspChannels" => HostMap::new(),
        "sendPayment" => args(&SendPaymentRequest {
            bolt11: BOLT11.to_owned(),
            amount_msat: Some(11_000),
            label: Some("coffee".to_owned()),
        }),
        "sendSpontaneousPayment" => args(&SendSpontaneousPaymentRequest {
            node_id: NODE_ID.to_owned(),
            amount_msat: 5_000,
            extra_tlvs: Some(vec![TlvEntry {
                field_number: 34_349_334,
                value: b"hello".to_vec(),
            }]),
            label: None,
        }),
        "receivePayment" => args(&ReceivePaymentRequest {
            amount_msat: 21_000,
            description: "tip".to_owned(),
            preimage: Some(vec![9; 32]),
            use_description_hash: Some(false),
            expiry: Some(3_600),
            cltv: Some(144),
        }),
        "listPayments" => args(&ListPaymentsRequest {
            filters: Some(vec![PaymentTypeFilter::Sent, PaymentTypeFilter::Received]),
            from_timestamp: Some(1_600_000_000),
            to_timestamp: None,
            include_failures: Some(true),
            limit: Some(20),
            offset: Some(0),
        }),
        "paymentByHash" => args(&PaymentByHashRequest { hash: PAYMENT_HASH.to_owned() }),
        "prepareSweep" => args(&PrepareSweepRequest {
            to_address: SWEEP_ADDRESS.to_owned(),
            sat_per_vbyte: 5,
        }),
        "createOffer" => args(&CreateOfferRequest {
            description: "donations".to_owned(),
            amount_msat: None,
            absolute_expiry: None,
            issuer: Some("alice".to_owned()),
        }),
        "payOffer" => args(&PayOfferRequest {
            req: OFFER.to_owned(),
            amount_msat: Some(50_000),
            payer_note: Some("thanks".to_owned()),
        }),
        "lnurlPay" => args(&LnUrlPayRequest {
            data: lnurl_pay_data(),
            amount_msat: 10_000,
            comment: Some("hi".to_owned()),
            payment_label: None,
        }),
        "withdrawLnurl" => args(&LnUrlWithdrawRequest {
            data: lnurl_withdraw_data(),
            amount_msat: 20_000,
            description: Some("faucet drip".to_owned()),
        }),
        "lnurlAuth" => args(&lnurl_auth_data()),
        "refund" => args(&RefundRequest {
            swap_address: REFUND_SWAP_ADDRESS.to_owned(),
            to_address: SWEEP_ADDRESS.to_owned(),
            sat_per_vbyte: 8,
        }),
        "sendOnchain" => args(&SendOnchainRequest {
            amount_sat: 100_000,
            onchain_recipient_address: SWEEP_ADDRESS.to_owned(),
            pair_hash: reverse_swap_pair_info().fees_hash,
            sat_per_vbyte: 8,
        }),
        "connectLsp" => args(&ConnectLspRequest { lsp_id: LSP_ID.to_owned() }),
        "fetchLspInfo" => args(&FetchLspInfoRequest { lsp_id: LSP_ID.to_owned() }),
        "buyBitcoin" => args(&BuyBitcoinRequest { provider: BuyBitcoinProvider::Moonpay }),
        "executeDevCommand" => args(&ExecuteCommandRequest { command: "getinfo".to_owned() }),
        "signMessage" => args(&SignMessageRequest { message: "hello".to_owned() }),
        "checkMessage" => args(&CheckMessageRequest {
            message: "hello".to_owned(),
            pubkey: NODE_ID.to_owned(),
            signature: "sig:68656c6c6f".to_owned(),
        }),
        _ => return None,
    };
    Some(map)
}

/// An event wire payload with an arbitrary `type`.
pub fn raw_event(kind: &str) -> JsonValue {
    serde_json::json!({ "type": kind })
}
