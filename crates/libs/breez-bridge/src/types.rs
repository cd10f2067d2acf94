mod config;
mod fiat;
mod input;
mod invoice;
mod lnurl;
mod node;
mod payment;
mod swap;

pub use config::{
    Config, ConnectRequest, DefaultConfigRequest, EmptyRequest, EnvironmentType,
    GreenlightCredentials, GreenlightNodeConfig, MnemonicToSeedRequest, Network, NodeConfig,
};
pub use fiat::{
    BuyBitcoinProvider, BuyBitcoinRequest, BuyBitcoinResponse, CurrencyInfo, FiatCurrency,
    LocaleOverrides, LocalizedName, Rate, Symbol,
};
pub use input::{BitcoinAddressData, InputType, ParseInputRequest};
pub use invoice::{LnInvoice, ParseInvoiceRequest, RouteHint, RouteHintHop};
pub use lnurl::{
    LnUrlAuthRequestData, LnUrlCallbackStatus, LnUrlErrorData, LnUrlPayErrorData, LnUrlPayRequest,
    LnUrlPayRequestData, LnUrlPayResult, LnUrlPaySuccessData, LnUrlWithdrawRequest,
    LnUrlWithdrawRequestData, MessageSuccessActionData, SuccessActionProcessed,
    UrlSuccessActionData,
};
pub use node::{
    BackupStatus, CheckMessageRequest, CheckMessageResponse, ConnectLspRequest,
    ExecuteCommandRequest, FetchLspInfoRequest, LspInformation, NodeState, RecommendedFees,
    SignMessageRequest, SignMessageResponse, UnspentTransactionOutput,
};
pub use payment::{
    ChannelState, ClosedChannelPaymentDetails, CreateOfferRequest, CreateOfferResponse,
    ListPaymentsRequest, LnPaymentDetails, PayOfferRequest, PayOfferResponse, Payment,
    PaymentByHashRequest, PaymentDetails, PaymentStatus, PaymentType, PaymentTypeFilter,
    PrepareSweepRequest, PrepareSweepResponse, ReceivePaymentRequest, ReceivePaymentResponse,
    SendPaymentRequest, SendPaymentResponse, SendSpontaneousPaymentRequest, TlvEntry,
};
pub use swap::{
    BackupFailedData, InvoicePaidDetails, PaymentFailedData, RefundRequest, RefundResponse,
    ReverseSwapInfo, ReverseSwapPairInfo, ReverseSwapStatus, SendOnchainRequest,
    SendOnchainResponse, SwapInfo, SwapStatus,
};

/// Static request schemas, for hosts that introspect argument shapes.
pub mod schemas {
    pub use super::config::{
        CONFIG, CONNECT_REQUEST, DEFAULT_CONFIG_REQUEST, EMPTY_REQUEST, GREENLIGHT_CREDENTIALS,
        GREENLIGHT_NODE_CONFIG, MNEMONIC_TO_SEED_REQUEST,
    };
    pub use super::fiat::BUY_BITCOIN_REQUEST;
    pub use super::input::PARSE_INPUT_REQUEST;
    pub use super::invoice::PARSE_INVOICE_REQUEST;
    pub use super::lnurl::{
        LN_URL_AUTH_REQUEST_DATA, LN_URL_PAY_REQUEST, LN_URL_PAY_REQUEST_DATA,
        LN_URL_WITHDRAW_REQUEST, LN_URL_WITHDRAW_REQUEST_DATA,
    };
    pub use super::node::{
        CHECK_MESSAGE_REQUEST, CONNECT_LSP_REQUEST, EXECUTE_COMMAND_REQUEST,
        FETCH_LSP_INFO_REQUEST, SIGN_MESSAGE_REQUEST,
    };
    pub use super::payment::{
        CREATE_OFFER_REQUEST, LIST_PAYMENTS_REQUEST, PAYMENT_BY_HASH_REQUEST, PAY_OFFER_REQUEST,
        PREPARE_SWEEP_REQUEST, RECEIVE_PAYMENT_REQUEST, SEND_PAYMENT_REQUEST,
        SEND_SPONTANEOUS_PAYMENT_REQUEST, TLV_ENTRY,
    };
    pub use super::swap::{REFUND_REQUEST, SEND_ONCHAIN_REQUEST};
}

#[cfg(test)]
mod tests;
