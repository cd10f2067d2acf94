//! The host-facing operation table.
//!
//! Each entry names an operation and how to turn validated arguments into a
//! call against the core. The argument schema comes from the entry's request
//! type, and whether a session is needed follows from the macro that built
//! it. Adding an operation means adding a request type with its schema and
//! one entry here.

use serde::Serialize;
use serde_bytes::ByteBuf;

use crate::backend::{CoreApi, CoreSession};
use crate::dispatcher::CallResult;
use crate::error::{BridgeError, HostError};
use crate::marshal::{marshal, unmarshal, MarshalError, Request};
use crate::schema::Schema;
use crate::types::{
    BuyBitcoinRequest, CheckMessageRequest, ConnectLspRequest, ConnectRequest, CreateOfferRequest,
    DefaultConfigRequest, EmptyRequest, ExecuteCommandRequest, FetchLspInfoRequest,
    ListPaymentsRequest, LnUrlAuthRequestData, LnUrlPayRequest, LnUrlWithdrawRequest,
    MnemonicToSeedRequest, ParseInputRequest, ParseInvoiceRequest, PayOfferRequest,
    PaymentByHashRequest, PrepareSweepRequest, ReceivePaymentRequest, RefundRequest,
    SendOnchainRequest, SendPaymentRequest, SendSpontaneousPaymentRequest, SignMessageRequest,
};
use crate::value::{HostMap, HostValue};

/// BIP39 seeds are always 512 bits.
pub const SEED_LEN: usize = 64;

pub(crate) type ApiCall = Box<dyn FnOnce(&dyn CoreApi) -> CallResult + Send + 'static>;
pub(crate) type SessionCall = Box<dyn FnOnce(&dyn CoreSession) -> CallResult + Send + 'static>;

/// A validated call, waiting for its core handle.
pub(crate) enum Prepared {
    Connect(ConnectRequest),
    Disconnect,
    Api(ApiCall),
    Session(SessionCall),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Api,
    Session,
}

pub struct Operation {
    pub name: &'static str,
    access: Access,
    schema: fn() -> &'static Schema,
    canonical: fn(&HostMap) -> Result<HostMap, MarshalError>,
    pub(crate) prepare: fn(&HostMap) -> Result<Prepared, MarshalError>,
}

impl Operation {
    /// Schema of the operation's arguments.
    pub fn schema(&self) -> &'static Schema {
        (self.schema)()
    }

    /// Whether the operation needs a connected session.
    pub fn requires_session(&self) -> bool {
        self.access == Access::Session
    }

    /// Validates `args` and returns the typed request in host form: enum
    /// spellings canonical, byte lists as bytes, unknown keys dropped and
    /// every field of the request present, `Null` when unset.
    pub fn canonical_args(&self, args: &HostMap) -> Result<HostMap, MarshalError> {
        (self.canonical)(args)
    }
}

impl std::fmt::Debug for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("schema", &self.schema().name)
            .field("requires_session", &self.requires_session())
            .finish()
    }
}

pub fn find(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|operation| operation.name == name)
}

fn canonical<R: Request>(args: &HostMap) -> Result<HostMap, MarshalError> {
    let request = marshal::<R>(args)?;
    match unmarshal(&request)? {
        HostValue::Map(map) => Ok(map),
        other => Err(BridgeError::SchemaMismatch {
            operation: R::schema().name.to_owned(),
            detail: format!("request encodes as {}, not a map", other.shape_name()),
        }
        .into()),
    }
}

fn api_call<R, T, E, F>(args: &HostMap, call: F) -> Result<Prepared, MarshalError>
where
    R: Request,
    T: Serialize,
    E: Into<HostError>,
    F: FnOnce(&dyn CoreApi, R) -> Result<T, E> + Send + 'static,
{
    let request = marshal::<R>(args)?;
    Ok(Prepared::Api(Box::new(move |core: &dyn CoreApi| encode(call(core, request)))))
}

fn session_call<R, T, E, F>(args: &HostMap, call: F) -> Result<Prepared, MarshalError>
where
    R: Request,
    T: Serialize,
    E: Into<HostError>,
    F: FnOnce(&dyn CoreSession, R) -> Result<T, E> + Send + 'static,
{
    let request = marshal::<R>(args)?;
    Ok(Prepared::Session(Box::new(move |session: &dyn CoreSession| {
        encode(call(session, request))
    })))
}

fn encode<T: Serialize, E: Into<HostError>>(result: Result<T, E>) -> CallResult {
    let response = result.map_err(Into::<HostError>::into)?;
    Ok(unmarshal(&response)?)
}

fn checked_seed(core: &dyn CoreApi, req: MnemonicToSeedRequest) -> Result<ByteBuf, HostError> {
    let seed = core.mnemonic_to_seed(req.phrase)?;
    if seed.len() != SEED_LEN {
        return Err(BridgeError::ContractViolation {
            operation: "mnemonicToSeed".to_owned(),
            detail: format!("expected {SEED_LEN} seed bytes, got {}", seed.len()),
        }
        .into());
    }
    Ok(ByteBuf::from(seed))
}

macro_rules! operation {
    ($name:literal, $access:ident, $request:ty, $prepare:expr) => {
        Operation {
            name: $name,
            access: Access::$access,
            schema: <$request as Request>::schema,
            canonical: canonical::<$request>,
            prepare: $prepare,
        }
    };
}

/// An operation served by the session-less core surface.
macro_rules! api_op {
    ($name:literal, |$core:ident, $req:tt: $request:ty| $body:expr) => {
        operation!($name, Api, $request, |args| {
            api_call(args, |$core, $req: $request| $body)
        })
    };
}

/// An operation served by the connected session.
macro_rules! session_op {
    ($name:literal, |$session:ident, $req:tt: $request:ty| $body:expr) => {
        operation!($name, Session, $request, |args| {
            session_call(args, |$session, $req: $request| $body)
        })
    };
}

pub static OPERATIONS: &[Operation] = &[
    operation!("connect", Api, ConnectRequest, |args| {
        Ok(Prepared::Connect(marshal::<ConnectRequest>(args)?))
    }),
    operation!("disconnect", Session, EmptyRequest, |args| {
        marshal::<EmptyRequest>(args)?;
        Ok(Prepared::Disconnect)
    }),
    api_op!("mnemonicToSeed", |core, req: MnemonicToSeedRequest| checked_seed(core, req)),
    api_op!("parseInput", |core, req: ParseInputRequest| core.parse_input(req.input)),
    api_op!("parseInvoice", |core, req: ParseInvoiceRequest| core.parse_invoice(req.invoice)),
    api_op!("defaultConfig", |core, req: DefaultConfigRequest| core.default_config(req)),
    session_op!("sync", |session, _: EmptyRequest| session.sync()),
    session_op!("nodeInfo", |session, _: EmptyRequest| session.node_info()),
    session_op!("sendPayment", |session, req: SendPaymentRequest| session.send_payment(req)),
    session_op!("sendSpontaneousPayment", |session, req: SendSpontaneousPaymentRequest| {
        session.send_spontaneous_payment(req)
    }),
    session_op!("receivePayment", |session, req: ReceivePaymentRequest| {
        session.receive_payment(req)
    }),
    session_op!("listPayments", |session, req: ListPaymentsRequest| session.list_payments(req)),
    session_op!("paymentByHash", |session, req: PaymentByHashRequest| {
        session.payment_by_hash(req.hash)
    }),
    session_op!("prepareSweep", |session, req: PrepareSweepRequest| session.prepare_sweep(req)),
    session_op!("createOffer", |session, req: CreateOfferRequest| session.create_offer(req)),
    session_op!("payOffer", |session, req: PayOfferRequest| session.pay_offer(req)),
    session_op!("lnurlPay", |session, req: LnUrlPayRequest| session.lnurl_pay(req)),
    session_op!("withdrawLnurl", |session, req: LnUrlWithdrawRequest| session.lnurl_withdraw(req)),
    session_op!("lnurlAuth", |session, req: LnUrlAuthRequestData| session.lnurl_auth(req)),
    session_op!("receiveOnchain", |session, _: EmptyRequest| session.receive_onchain()),
    session_op!("inProgressSwap", |session, _: EmptyRequest| session.in_progress_swap()),
    session_op!("listRefundables", |session, _: EmptyRequest| session.list_refundables()),
    session_op!("refund", |session, req: RefundRequest| session.refund(req)),
    session_op!("fetchReverseSwapFees", |session, _: EmptyRequest| {
        session.fetch_reverse_swap_fees()
    }),
    session_op!("sendOnchain", |session, req: SendOnchainRequest| session.send_onchain(req)),
    session_op!("inProgressReverseSwaps", |session, _: EmptyRequest| {
        session.in_progress_reverse_swaps()
    }),
    session_op!("fetchFiatRates", |session, _: EmptyRequest| session.fetch_fiat_rates()),
    session_op!("listFiatCurrencies", |session, _: EmptyRequest| session.list_fiat_currencies()),
    session_op!("listLsps", |session, _: EmptyRequest| session.list_lsps()),
    session_op!("connectLsp", |session, req: ConnectLspRequest| session.connect_lsp(req)),
    session_op!("lspId", |session, _: EmptyRequest| session.lsp_id()),
    session_op!("fetchLspInfo", |session, req: FetchLspInfoRequest| {
        session.fetch_lsp_info(req.lsp_id)
    }),
    session_op!("closeLspChannels", |session, _: EmptyRequest| session.close_lsp_channels()),
    session_op!("buyBitcoin", |session, req: BuyBitcoinRequest| session.buy_bitcoin(req)),
    session_op!("backup", |session, _: EmptyRequest| session.backup()),
    session_op!("backupStatus", |session, _: EmptyRequest| session.backup_status()),
    session_op!("recommendedFees", |session, _: EmptyRequest| session.recommended_fees()),
    session_op!("signMessage", |session, req: SignMessageRequest| session.sign_message(req)),
    session_op!("checkMessage", |session, req: CheckMessageRequest| session.check_message(req)),
    session_op!("executeDevCommand", |session, req: ExecuteCommandRequest| {
        session.execute_dev_command(req.command)
    }),
];
