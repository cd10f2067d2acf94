//! The surface the bridge expects from the core SDK.
//!
//! Core calls are blocking; the dispatcher runs each one on its own worker.
//! Implementations must be shareable across workers.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::{BridgeError, CoreError};
use crate::types::{
    BackupStatus, BuyBitcoinRequest, BuyBitcoinResponse, CheckMessageRequest,
    CheckMessageResponse, Config, ConnectLspRequest, ConnectRequest, CreateOfferRequest,
    CreateOfferResponse, DefaultConfigRequest, FiatCurrency, InputType, ListPaymentsRequest,
    LnInvoice, LnUrlAuthRequestData, LnUrlCallbackStatus, LnUrlPayRequest, LnUrlPayResult,
    LnUrlWithdrawRequest, LspInformation, NodeState, PayOfferRequest, PayOfferResponse, Payment,
    PrepareSweepRequest, PrepareSweepResponse, Rate, ReceivePaymentRequest,
    ReceivePaymentResponse, RecommendedFees, RefundRequest, RefundResponse, ReverseSwapInfo,
    ReverseSwapPairInfo, SendOnchainRequest, SendOnchainResponse, SendPaymentRequest,
    SendPaymentResponse, SendSpontaneousPaymentRequest, SignMessageRequest, SignMessageResponse,
    SwapInfo,
};

/// Session-less entry points of the core.
pub trait CoreApi: Send + Sync {
    /// Starts a session. The core reports events through `sink` until the
    /// session is disconnected.
    fn connect(
        &self,
        req: ConnectRequest,
        sink: Arc<dyn CoreEventSink>,
    ) -> Result<Arc<dyn CoreSession>, CoreError>;

    fn mnemonic_to_seed(&self, phrase: String) -> Result<Vec<u8>, CoreError>;

    fn parse_input(&self, input: String) -> Result<InputType, CoreError>;

    fn parse_invoice(&self, invoice: String) -> Result<LnInvoice, CoreError>;

    fn default_config(&self, req: DefaultConfigRequest) -> Result<Config, CoreError>;
}

/// A connected core session.
pub trait CoreSession: Send + Sync {
    fn disconnect(&self) -> Result<(), CoreError>;

    fn sync(&self) -> Result<(), CoreError>;

    fn node_info(&self) -> Result<NodeState, CoreError>;

    fn send_payment(&self, req: SendPaymentRequest) -> Result<SendPaymentResponse, CoreError>;

    fn send_spontaneous_payment(
        &self,
        req: SendSpontaneousPaymentRequest,
    ) -> Result<SendPaymentResponse, CoreError>;

    fn receive_payment(
        &self,
        req: ReceivePaymentRequest,
    ) -> Result<ReceivePaymentResponse, CoreError>;

    fn list_payments(&self, req: ListPaymentsRequest) -> Result<Vec<Payment>, CoreError>;

    fn payment_by_hash(&self, hash: String) -> Result<Option<Payment>, CoreError>;

    fn prepare_sweep(&self, _req: PrepareSweepRequest) -> Result<PrepareSweepResponse, CoreError> {
        Err(CoreError::generic("core does not support sweeping closed channels"))
    }

    fn create_offer(&self, _req: CreateOfferRequest) -> Result<CreateOfferResponse, CoreError> {
        Err(CoreError::generic("core does not support BOLT12 offers"))
    }

    fn pay_offer(&self, _req: PayOfferRequest) -> Result<PayOfferResponse, CoreError> {
        Err(CoreError::generic("core does not support BOLT12 offers"))
    }

    fn lnurl_pay(&self, req: LnUrlPayRequest) -> Result<LnUrlPayResult, CoreError>;

    fn lnurl_withdraw(&self, req: LnUrlWithdrawRequest) -> Result<LnUrlCallbackStatus, CoreError>;

    fn lnurl_auth(&self, req: LnUrlAuthRequestData) -> Result<LnUrlCallbackStatus, CoreError>;

    /// Starts a swap-in; the returned address takes the on-chain deposit.
    fn receive_onchain(&self) -> Result<SwapInfo, CoreError>;

    fn in_progress_swap(&self) -> Result<Option<SwapInfo>, CoreError>;

    fn list_refundables(&self) -> Result<Vec<SwapInfo>, CoreError>;

    fn refund(&self, req: RefundRequest) -> Result<RefundResponse, CoreError>;

    fn fetch_reverse_swap_fees(&self) -> Result<ReverseSwapPairInfo, CoreError>;

    fn send_onchain(&self, req: SendOnchainRequest) -> Result<SendOnchainResponse, CoreError>;

    fn in_progress_reverse_swaps(&self) -> Result<Vec<ReverseSwapInfo>, CoreError>;

    fn fetch_fiat_rates(&self) -> Result<Vec<Rate>, CoreError>;

    fn list_fiat_currencies(&self) -> Result<Vec<FiatCurrency>, CoreError>;

    fn list_lsps(&self) -> Result<Vec<LspInformation>, CoreError>;

    fn connect_lsp(&self, req: ConnectLspRequest) -> Result<(), CoreError>;

    /// The LSP the session currently uses, if any.
    fn lsp_id(&self) -> Result<Option<String>, CoreError>;

    fn fetch_lsp_info(&self, lsp_id: String) -> Result<Option<LspInformation>, CoreError>;

    /// Closes every channel with the current LSP; returns the closing txids.
    fn close_lsp_channels(&self) -> Result<Vec<String>, CoreError>;

    fn buy_bitcoin(&self, _req: BuyBitcoinRequest) -> Result<BuyBitcoinResponse, CoreError> {
        Err(CoreError::generic("core has no fiat on-ramp provider"))
    }

    fn execute_dev_command(&self, _command: String) -> Result<String, CoreError> {
        Err(CoreError::generic("core does not accept developer commands"))
    }

    fn backup(&self) -> Result<(), CoreError>;

    fn backup_status(&self) -> Result<BackupStatus, CoreError>;

    fn recommended_fees(&self) -> Result<RecommendedFees, CoreError>;

    fn sign_message(&self, req: SignMessageRequest) -> Result<SignMessageResponse, CoreError>;

    fn check_message(&self, req: CheckMessageRequest) -> Result<CheckMessageResponse, CoreError>;
}

/// Where the core reports events. Called on core-owned threads.
///
/// The payload is the wire form of an event: a JSON object with a `type`
/// discriminant. An unrecognized event is reported back as an error.
pub trait CoreEventSink: Send + Sync {
    fn on_event(&self, event: JsonValue) -> Result<(), BridgeError>;
}
