use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use bip39::{Language, Mnemonic};
use breez_bridge::types::{
    BackupStatus, BuyBitcoinProvider, BuyBitcoinRequest, BuyBitcoinResponse, CheckMessageRequest,
    CheckMessageResponse, Config, ConnectLspRequest, ConnectRequest, CreateOfferRequest,
    CreateOfferResponse, DefaultConfigRequest, EnvironmentType, FiatCurrency, InputType,
    ListPaymentsRequest, LnInvoice, LnPaymentDetails, LnUrlAuthRequestData, LnUrlCallbackStatus,
    LnUrlErrorData, LnUrlPayRequest, LnUrlPayResult, LnUrlPaySuccessData, LnUrlWithdrawRequest,
    LspInformation, MessageSuccessActionData, NodeState, PayOfferRequest, PayOfferResponse,
    Payment, PaymentDetails, PaymentType, PaymentTypeFilter, Rate, ReceivePaymentRequest,
    ReceivePaymentResponse, RecommendedFees, RefundRequest, RefundResponse, ReverseSwapInfo,
    ReverseSwapPairInfo, ReverseSwapStatus, SendOnchainRequest, SendOnchainResponse,
    SendPaymentRequest, SendPaymentResponse, SendSpontaneousPaymentRequest, SignMessageRequest,
    SignMessageResponse, SuccessActionProcessed, SwapInfo, SwapStatus,
};
use breez_bridge::{BreezEvent, BridgeError, CoreApi, CoreError, CoreEventSink, CoreSession};
use serde_json::Value as JsonValue;

use crate::fixtures;

/// Holds calls to one operation until opened.
#[derive(Default)]
pub struct Gate {
    state: Mutex<GateState>,
    changed: Condvar,
}

#[derive(Default)]
struct GateState {
    open: bool,
    entered: usize,
}

impl Gate {
    pub fn open(&self) {
        self.state.lock().expect("gate mutex poisoned").open = true;
        self.changed.notify_all();
    }

    /// Blocks until `count` calls reached the gate or `timeout` elapsed.
    pub fn wait_entered(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().expect("gate mutex poisoned");
        while state.entered < count {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            state = self.changed.wait_timeout(state, remaining).expect("gate mutex poisoned").0;
        }
        true
    }

    fn pass(&self) {
        let mut state = self.state.lock().expect("gate mutex poisoned");
        state.entered += 1;
        self.changed.notify_all();
        while !state.open {
            state = self.changed.wait(state).expect("gate mutex poisoned");
        }
    }
}

#[derive(Default)]
struct MockState {
    calls: Mutex<Vec<&'static str>>,
    call_count: AtomicUsize,
    failures: Mutex<HashMap<&'static str, VecDeque<CoreError>>>,
    gates: Mutex<HashMap<&'static str, Arc<Gate>>>,
    sink: Mutex<Option<Arc<dyn CoreEventSink>>>,
    connected_with: Mutex<Option<ConnectRequest>>,
    payments: Mutex<Vec<Payment>>,
    seed_override: Mutex<Option<Vec<u8>>>,
    backed_up: AtomicBool,
    swaps: Mutex<Vec<SwapInfo>>,
    reverse_swaps: Mutex<Vec<ReverseSwapInfo>>,
    lsp_id: Mutex<Option<String>>,
}

impl MockState {
    fn enter(&self, operation: &'static str) -> Result<(), CoreError> {
        self.calls.lock().expect("calls mutex poisoned").push(operation);
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().expect("gates mutex poisoned").get(operation).cloned();
        if let Some(gate) = gate {
            gate.pass();
        }
        match self
            .failures
            .lock()
            .expect("failures mutex poisoned")
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn emit(&self, event: BreezEvent) -> Result<(), CoreError> {
        let sink = self.sink.lock().expect("sink mutex poisoned").clone();
        let Some(sink) = sink else {
            return Ok(());
        };
        let wire = event.to_wire().map_err(|err| CoreError::generic(err.to_string()))?;
        sink.on_event(wire).map_err(|err| CoreError::generic(err.to_string()))
    }

    fn record_payment(&self, payment: Payment) -> Payment {
        self.payments.lock().expect("payments mutex poisoned").push(payment.clone());
        payment
    }

    fn in_progress_swap(&self) -> Option<SwapInfo> {
        self.swaps
            .lock()
            .expect("swaps mutex poisoned")
            .iter()
            .rev()
            .find(|swap| {
                matches!(swap.status, SwapStatus::Initial | SwapStatus::WaitingConfirmation)
            })
            .cloned()
    }

    /// The swap-in address to fund: the open swap, or a fresh one.
    fn swap_in(&self) -> Result<SwapInfo, CoreError> {
        if let Some(swap) = self.in_progress_swap() {
            return Ok(swap);
        }
        let swap = fixtures::swap_info(fixtures::SWAP_ADDRESS, SwapStatus::Initial);
        self.swaps.lock().expect("swaps mutex poisoned").push(swap.clone());
        self.emit(BreezEvent::SwapUpdated { details: swap.clone() })?;
        Ok(swap)
    }
}

/// In-memory core with scripted failures, call gates and an event sink the
/// test can drive directly.
#[derive(Default)]
pub struct MockCore {
    state: Arc<MockState>,
}

impl MockCore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations that reached the core, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.call_count.load(Ordering::SeqCst)
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls().iter().filter(|name| **name == operation).count()
    }

    /// Makes the next call to `operation` fail with `err`.
    pub fn fail_next(&self, operation: &'static str, err: CoreError) {
        self.state
            .failures
            .lock()
            .expect("failures mutex poisoned")
            .entry(operation)
            .or_default()
            .push_back(err);
    }

    /// Installs a gate that holds every call to `operation` until opened.
    pub fn gate(&self, operation: &'static str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.state.gates.lock().expect("gates mutex poisoned").insert(operation, Arc::clone(&gate));
        gate
    }

    /// Replaces the derived seed returned by `mnemonic_to_seed`.
    pub fn override_seed(&self, seed: Vec<u8>) {
        *self.state.seed_override.lock().expect("seed mutex poisoned") = Some(seed);
    }

    pub fn connected_with(&self) -> Option<ConnectRequest> {
        self.state.connected_with.lock().expect("connect mutex poisoned").clone()
    }

    /// Seeds the payment history returned by `list_payments`.
    pub fn add_payment(&self, payment: Payment) {
        self.state.record_payment(payment);
    }

    /// Seeds a swap-in, e.g. one that already expired and can be refunded.
    pub fn add_swap(&self, swap: SwapInfo) {
        self.state.swaps.lock().expect("swaps mutex poisoned").push(swap);
    }

    /// Pushes `event` through the sink of the current session.
    pub fn emit(&self, event: &BreezEvent) -> Result<(), BridgeError> {
        self.emit_wire(event.to_wire()?)
    }

    /// Pushes a raw wire payload, valid or not, through the session sink.
    pub fn emit_wire(&self, wire: JsonValue) -> Result<(), BridgeError> {
        let sink = self
            .state
            .sink
            .lock()
            .expect("sink mutex poisoned")
            .clone()
            .expect("mock core has no session sink; connect first");
        sink.on_event(wire)
    }
}

impl CoreApi for MockCore {
    fn connect(
        &self,
        req: ConnectRequest,
        sink: Arc<dyn CoreEventSink>,
    ) -> Result<Arc<dyn CoreSession>, CoreError> {
        self.state.enter("connect")?;
        *self.state.lsp_id.lock().expect("lsp mutex poisoned") = req.config.default_lsp_id.clone();
        *self.state.connected_with.lock().expect("connect mutex poisoned") = Some(req);
        *self.state.sink.lock().expect("sink mutex poisoned") = Some(sink);
        Ok(Arc::new(MockSession { state: Arc::clone(&self.state) }))
    }

    fn mnemonic_to_seed(&self, phrase: String) -> Result<Vec<u8>, CoreError> {
        self.state.enter("mnemonicToSeed")?;
        if let Some(seed) = self.state.seed_override.lock().expect("seed mutex poisoned").clone() {
            return Ok(seed);
        }
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, &phrase)
            .map_err(|err| CoreError::invalid_input(err.to_string()))?;
        Ok(mnemonic.to_seed_normalized("").to_vec())
    }

    fn parse_input(&self, input: String) -> Result<InputType, CoreError> {
        self.state.enter("parseInput")?;
        let trimmed = input.trim();
        let lower = trimmed.to_lowercase();
        let parsed = if lower.starts_with("lnbc") || lower.starts_with("lntb") {
            InputType::Bolt11 { invoice: fixtures::invoice(trimmed) }
        } else if lower.starts_with("lno1") {
            InputType::Bolt12Offer { offer: trimmed.to_owned() }
        } else if lower.starts_with("lnurl") || trimmed.contains('@') {
            InputType::LnUrlPay { data: fixtures::lnurl_pay_data() }
        } else if lower.starts_with("bc1") || lower.starts_with("bitcoin:") {
            let address = trimmed.trim_start_matches("bitcoin:");
            InputType::BitcoinAddress { address: fixtures::bitcoin_address(address) }
        } else if lower.starts_with("https://") || lower.starts_with("http://") {
            InputType::Url { url: trimmed.to_owned() }
        } else if trimmed.len() == 66 && hex::decode(trimmed).is_ok() {
            InputType::NodeId { node_id: trimmed.to_owned() }
        } else {
            return Err(CoreError::invalid_input(format!("unrecognized input: {trimmed}")));
        };
        Ok(parsed)
    }

    fn parse_invoice(&self, invoice: String) -> Result<LnInvoice, CoreError> {
        self.state.enter("parseInvoice")?;
        if invoice.to_lowercase().starts_with("lnbc") {
            Ok(fixtures::invoice(&invoice))
        } else {
            Err(CoreError::InvalidInvoice { err: "invalid bech32 invoice".to_owned() })
        }
    }

    fn default_config(&self, req: DefaultConfigRequest) -> Result<Config, CoreError> {
        self.state.enter("defaultConfig")?;
        let mut config = fixtures::config();
        if req.env_type == EnvironmentType::Staging {
            config.breezserver = "https://bs1-st.breez.technology:443".to_owned();
        }
        config.api_key = Some(req.api_key);
        config.node_config = req.node_config;
        Ok(config)
    }
}

struct MockSession {
    state: Arc<MockState>,
}

impl MockSession {
    fn ln_payment(&self, id: String, amount_msat: u64, bolt11: &str, keysend: bool) -> Payment {
        let mut payment = fixtures::payment(&id, amount_msat);
        if let PaymentDetails::Ln { data } = &mut payment.details {
            *data = LnPaymentDetails { bolt11: bolt11.to_owned(), keysend, ..data.clone() };
        }
        payment
    }
}

impl CoreSession for MockSession {
    fn disconnect(&self) -> Result<(), CoreError> {
        self.state.enter("disconnect")?;
        self.state.sink.lock().expect("sink mutex poisoned").take();
        Ok(())
    }

    fn sync(&self) -> Result<(), CoreError> {
        self.state.enter("sync")?;
        self.state.emit(BreezEvent::Synced)
    }

    fn node_info(&self) -> Result<NodeState, CoreError> {
        self.state.enter("nodeInfo")?;
        Ok(fixtures::node_state())
    }

    fn send_payment(&self, req: SendPaymentRequest) -> Result<SendPaymentResponse, CoreError> {
        self.state.enter("sendPayment")?;
        let already_paid =
            self.state.payments.lock().expect("payments mutex poisoned").iter().any(|payment| {
                matches!(&payment.details, PaymentDetails::Ln { data } if data.bolt11 == req.bolt11)
            });
        if already_paid {
            return Err(CoreError::AlreadyPaid { err: "invoice already paid".to_owned() });
        }
        let amount_msat = req.amount_msat.unwrap_or(11_000);
        let payment =
            self.ln_payment(fixtures::PAYMENT_HASH.to_owned(), amount_msat, &req.bolt11, false);
        let payment = self.state.record_payment(payment);
        self.state.emit(BreezEvent::PaymentSucceed { details: payment.clone() })?;
        Ok(SendPaymentResponse { payment })
    }

    fn send_spontaneous_payment(
        &self,
        req: SendSpontaneousPaymentRequest,
    ) -> Result<SendPaymentResponse, CoreError> {
        self.state.enter("sendSpontaneousPayment")?;
        if req.amount_msat == 0 {
            return Err(CoreError::InvalidAmount { err: "amount must be positive".to_owned() });
        }
        let count = self.state.payments.lock().expect("payments mutex poisoned").len();
        let id = format!("{:064x}", count + 1);
        let payment = self.ln_payment(id, req.amount_msat, "", true);
        Ok(SendPaymentResponse { payment: self.state.record_payment(payment) })
    }

    fn receive_payment(
        &self,
        req: ReceivePaymentRequest,
    ) -> Result<ReceivePaymentResponse, CoreError> {
        self.state.enter("receivePayment")?;
        let mut ln_invoice = fixtures::invoice(fixtures::BOLT11);
        ln_invoice.amount_msat = Some(req.amount_msat);
        ln_invoice.description = Some(req.description);
        if let Some(expiry) = req.expiry {
            ln_invoice.expiry = u64::from(expiry);
        }
        if let Some(preimage) = req.preimage {
            ln_invoice.payment_hash = hex::encode(preimage);
        }
        Ok(ReceivePaymentResponse { ln_invoice, opening_fee_msat: None })
    }

    fn list_payments(&self, req: ListPaymentsRequest) -> Result<Vec<Payment>, CoreError> {
        self.state.enter("listPayments")?;
        let payments = self.state.payments.lock().expect("payments mutex poisoned").clone();
        let offset = req.offset.unwrap_or(0) as usize;
        let limit = req.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(payments
            .into_iter()
            .filter(|payment| match &req.filters {
                Some(filters) => filters.iter().any(|filter| {
                    matches!(
                        (filter, &payment.payment_type),
                        (PaymentTypeFilter::Sent, PaymentType::Sent)
                            | (PaymentTypeFilter::Received, PaymentType::Received)
                            | (PaymentTypeFilter::ClosedChannel, PaymentType::ClosedChannel)
                    )
                }),
                None => true,
            })
            .skip(offset)
            .take(limit)
            .collect())
    }

    fn payment_by_hash(&self, hash: String) -> Result<Option<Payment>, CoreError> {
        self.state.enter("paymentByHash")?;
        Ok(self
            .state
            .payments
            .lock()
            .expect("payments mutex poisoned")
            .iter()
            .find(|payment| payment.id == hash)
            .cloned())
    }

    fn create_offer(&self, _req: CreateOfferRequest) -> Result<CreateOfferResponse, CoreError> {
        self.state.enter("createOffer")?;
        Ok(CreateOfferResponse { offer: fixtures::OFFER.to_owned() })
    }

    fn pay_offer(&self, req: PayOfferRequest) -> Result<PayOfferResponse, CoreError> {
        self.state.enter("payOffer")?;
        let amount_msat = req
            .amount_msat
            .ok_or_else(|| CoreError::InvalidAmount { err: "offer has no amount".to_owned() })?;
        let payment = self.ln_payment(fixtures::PAYMENT_HASH.to_owned(), amount_msat, "", false);
        Ok(PayOfferResponse { payment: self.state.record_payment(payment) })
    }

    fn lnurl_pay(&self, req: LnUrlPayRequest) -> Result<LnUrlPayResult, CoreError> {
        self.state.enter("lnurlPay")?;
        if req.amount_msat < req.data.min_sendable || req.amount_msat > req.data.max_sendable {
            return Err(CoreError::InvalidAmount {
                err: format!(
                    "amount must be between {} and {} msat",
                    req.data.min_sendable, req.data.max_sendable
                ),
            });
        }
        let payment =
            self.ln_payment(fixtures::PAYMENT_HASH.to_owned(), req.amount_msat, "", false);
        Ok(LnUrlPayResult::EndpointSuccess {
            data: LnUrlPaySuccessData {
                payment: self.state.record_payment(payment),
                success_action: Some(SuccessActionProcessed::Message {
                    data: MessageSuccessActionData { message: "Thanks".to_owned() },
                }),
            },
        })
    }

    fn lnurl_withdraw(&self, req: LnUrlWithdrawRequest) -> Result<LnUrlCallbackStatus, CoreError> {
        self.state.enter("withdrawLnurl")?;
        let (min, max) = (req.data.min_withdrawable, req.data.max_withdrawable);
        if req.amount_msat < min || req.amount_msat > max {
            return Err(CoreError::InvalidAmount {
                err: format!("amount must be between {min} and {max} msat"),
            });
        }
        Ok(LnUrlCallbackStatus::Ok)
    }

    fn lnurl_auth(&self, req: LnUrlAuthRequestData) -> Result<LnUrlCallbackStatus, CoreError> {
        self.state.enter("lnurlAuth")?;
        if req.k1.len() != 64 || hex::decode(&req.k1).is_err() {
            return Ok(LnUrlCallbackStatus::ErrorStatus {
                data: LnUrlErrorData { reason: "k1 must be 32 bytes of hex".to_owned() },
            });
        }
        Ok(LnUrlCallbackStatus::Ok)
    }

    fn receive_onchain(&self) -> Result<SwapInfo, CoreError> {
        self.state.enter("receiveOnchain")?;
        self.state.swap_in()
    }

    fn in_progress_swap(&self) -> Result<Option<SwapInfo>, CoreError> {
        self.state.enter("inProgressSwap")?;
        Ok(self.state.in_progress_swap())
    }

    fn list_refundables(&self) -> Result<Vec<SwapInfo>, CoreError> {
        self.state.enter("listRefundables")?;
        let swaps = self.state.swaps.lock().expect("swaps mutex poisoned");
        Ok(swaps.iter().filter(|swap| swap.status == SwapStatus::Refundable).cloned().collect())
    }

    fn refund(&self, req: RefundRequest) -> Result<RefundResponse, CoreError> {
        self.state.enter("refund")?;
        let mut swaps = self.state.swaps.lock().expect("swaps mutex poisoned");
        let swap = swaps
            .iter_mut()
            .find(|swap| swap.bitcoin_address == req.swap_address)
            .ok_or_else(|| CoreError::generic(format!("no swap at {}", req.swap_address)))?;
        if swap.status != SwapStatus::Refundable {
            let reason = format!("swap at {} is not refundable", req.swap_address);
            return Err(CoreError::generic(reason));
        }
        let refund_tx_id = format!("{:064x}", swap.refund_tx_ids.len() + 1);
        swap.refund_tx_ids.push(refund_tx_id.clone());
        Ok(RefundResponse { refund_tx_id })
    }

    fn fetch_reverse_swap_fees(&self) -> Result<ReverseSwapPairInfo, CoreError> {
        self.state.enter("fetchReverseSwapFees")?;
        Ok(fixtures::reverse_swap_pair_info())
    }

    fn send_onchain(&self, req: SendOnchainRequest) -> Result<SendOnchainResponse, CoreError> {
        self.state.enter("sendOnchain")?;
        let fees = fixtures::reverse_swap_pair_info();
        if req.pair_hash != fees.fees_hash {
            return Err(CoreError::generic("reverse swap fees changed; fetch them again"));
        }
        if req.amount_sat < fees.min || req.amount_sat > fees.max {
            return Err(CoreError::InvalidAmount {
                err: format!("amount must be between {} and {} sat", fees.min, fees.max),
            });
        }
        let mut reverse_swaps =
            self.state.reverse_swaps.lock().expect("reverse swaps mutex poisoned");
        let busy = reverse_swaps.iter().any(|swap| {
            matches!(swap.status, ReverseSwapStatus::Initial | ReverseSwapStatus::InProgress)
        });
        if busy {
            return Err(CoreError::generic("a reverse swap is already in progress"));
        }
        let reverse_swap_info = ReverseSwapInfo {
            id: format!("rs-{}", reverse_swaps.len() + 1),
            claim_pubkey: fixtures::NODE_ID.to_owned(),
            lockup_txid: None,
            claim_txid: None,
            onchain_amount_sat: req.amount_sat.saturating_sub(fees.fees_lockup + fees.fees_claim),
            status: ReverseSwapStatus::Initial,
        };
        reverse_swaps.push(reverse_swap_info.clone());
        drop(reverse_swaps);
        self.state.emit(BreezEvent::ReverseSwapUpdated { details: reverse_swap_info.clone() })?;
        Ok(SendOnchainResponse { reverse_swap_info })
    }

    fn in_progress_reverse_swaps(&self) -> Result<Vec<ReverseSwapInfo>, CoreError> {
        self.state.enter("inProgressReverseSwaps")?;
        let reverse_swaps = self.state.reverse_swaps.lock().expect("reverse swaps mutex poisoned");
        Ok(reverse_swaps
            .iter()
            .filter(|swap| {
                matches!(swap.status, ReverseSwapStatus::Initial | ReverseSwapStatus::InProgress)
            })
            .cloned()
            .collect())
    }

    fn fetch_fiat_rates(&self) -> Result<Vec<Rate>, CoreError> {
        self.state.enter("fetchFiatRates")?;
        Ok(fixtures::fiat_rates())
    }

    fn list_fiat_currencies(&self) -> Result<Vec<FiatCurrency>, CoreError> {
        self.state.enter("listFiatCurrencies")?;
        Ok(fixtures::fiat_currencies())
    }

    fn list_lsps(&self) -> Result<Vec<LspInformation>, CoreError> {
        self.state.enter("listLsps")?;
        Ok(vec![fixtures::lsp()])
    }

    fn connect_lsp(&self, req: ConnectLspRequest) -> Result<(), CoreError> {
        self.state.enter("connectLsp")?;
        if req.lsp_id != fixtures::LSP_ID {
            return Err(CoreError::generic(format!("unknown lsp {}", req.lsp_id)));
        }
        *self.state.lsp_id.lock().expect("lsp mutex poisoned") = Some(req.lsp_id);
        Ok(())
    }

    fn lsp_id(&self) -> Result<Option<String>, CoreError> {
        self.state.enter("lspId")?;
        Ok(self.state.lsp_id.lock().expect("lsp mutex poisoned").clone())
    }

    fn fetch_lsp_info(&self, lsp_id: String) -> Result<Option<LspInformation>, CoreError> {
        self.state.enter("fetchLspInfo")?;
        Ok((lsp_id == fixtures::LSP_ID).then(fixtures::lsp))
    }

    fn close_lsp_channels(&self) -> Result<Vec<String>, CoreError> {
        self.state.enter("closeLspChannels")?;
        if self.state.lsp_id.lock().expect("lsp mutex poisoned").is_none() {
            return Ok(Vec::new());
        }
        Ok(vec![fixtures::CLOSING_TXID.to_owned()])
    }

    fn buy_bitcoin(&self, req: BuyBitcoinRequest) -> Result<BuyBitcoinResponse, CoreError> {
        self.state.enter("buyBitcoin")?;
        let swap = self.state.swap_in()?;
        let url = match req.provider {
            BuyBitcoinProvider::Moonpay => {
                format!("https://buy.moonpay.com?walletAddress={}", swap.bitcoin_address)
            }
        };
        Ok(BuyBitcoinResponse { url })
    }

    fn execute_dev_command(&self, command: String) -> Result<String, CoreError> {
        self.state.enter("executeDevCommand")?;
        match command.as_str() {
            "getinfo" => {
                Ok(serde_json::json!({ "id": fixtures::NODE_ID, "blockheight": 815_288 })
                    .to_string())
            }
            other => Err(CoreError::generic(format!("unknown command '{other}'"))),
        }
    }

    fn backup(&self) -> Result<(), CoreError> {
        self.state.enter("backup")?;
        self.state.emit(BreezEvent::BackupStarted)?;
        self.state.backed_up.store(true, Ordering::SeqCst);
        self.state.emit(BreezEvent::BackupSucceeded)
    }

    fn backup_status(&self) -> Result<BackupStatus, CoreError> {
        self.state.enter("backupStatus")?;
        let backed_up = self.state.backed_up.load(Ordering::SeqCst);
        Ok(BackupStatus { backed_up, last_backup_time: backed_up.then_some(1_700_000_000) })
    }

    fn recommended_fees(&self) -> Result<RecommendedFees, CoreError> {
        self.state.enter("recommendedFees")?;
        Ok(fixtures::recommended_fees())
    }

    fn sign_message(&self, req: SignMessageRequest) -> Result<SignMessageResponse, CoreError> {
        self.state.enter("signMessage")?;
        Ok(SignMessageResponse { signature: signature_of(&req.message) })
    }

    fn check_message(&self, req: CheckMessageRequest) -> Result<CheckMessageResponse, CoreError> {
        self.state.enter("checkMessage")?;
        let is_valid =
            req.pubkey == fixtures::NODE_ID && req.signature == signature_of(&req.message);
        Ok(CheckMessageResponse { is_valid })
    }
}

fn signature_of(message: &str) -> String {
    format!("sig:{}", hex::encode(message))
}
