mod common;

use std::cell::RefCell;
use std::rc::Rc;

use mpt_core::ident::TSCI;
use mpt_core::{ChannelRole, TRAFFIC_SYNC_WORD, debug};
use mpt_entities::{Channel, ChannelState, ReplyOutcome};
use mpt_pdus::Codeword;
use mpt_pdus::codewords::ack::Ack;
use mpt_pdus::codewords::ahoy::{Ahy, Ahyc};
use mpt_pdus::codewords::gtc::Gtc;
use mpt_pdus::codewords::maint::Clear;
use mpt_pdus::codewords::request::Rqr;
use mpt_pdus::enums::ack_function::AckFunction;

use common::{ChannelHarness, ModemCall, alh, ccsc, default_test_channel, wire};

fn test_gtc() -> Codeword {
    Codeword::Gtc(Gtc { pfix: 0x10, ident1: 42, d: false, chan: 2, ident2: 43, n: 0 })
}

fn test_ahyc(slots: u8) -> Codeword {
    Codeword::Ahyc(Ahyc { pfix: 0x10, ident1: 42, ident2: TSCI, slots, desc: 0 })
}

fn test_clear() -> Codeword {
    Codeword::Clear(Clear { chan: 2, cont: 1, rsvd: 0, spare: 0 })
}

/// Records every reply outcome delivered to the callback
fn reply_sink() -> (Rc<RefCell<Vec<ReplyOutcome>>>, mpt_entities::ReplyCallback) {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let sink = outcomes.clone();
    let cb: mpt_entities::ReplyCallback = Box::new(move |_: &mut Channel, outcome: ReplyOutcome| {
        sink.borrow_mut().push(outcome);
    });
    (outcomes, cb)
}

#[test]
fn test_aloha_cadence() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());

    let sent = h.run_idle(12);
    let expected = vec![
        ccsc(), alh(5),
        ccsc(), alh(0),
        ccsc(), alh(0),
        ccsc(), alh(0),
        ccsc(), alh(0),
        ccsc(), alh(5),
    ];
    assert_eq!(sent, expected);
    assert_eq!(h.channel.aloha_counter(), 4);
}

#[test]
fn test_queued_codeword_replaces_aloha() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.enqueue_control(test_gtc(), None, 0, None);
    assert_eq!(h.channel.queue_lengths(), (1, 0));

    let sent = h.run_idle(4);
    assert_eq!(sent, vec![ccsc(), wire(test_gtc()), ccsc(), alh(0)]);
    // The frame counter advances regardless of what went out
    assert_eq!(h.channel.aloha_counter(), 3);
    assert_eq!(h.channel.queue_lengths(), (0, 0));
}

#[test]
fn test_control_queue_fifo() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.enqueue_control(test_gtc(), None, 0, None);
    h.channel.enqueue_control(test_clear(), None, 0, None);

    let sent = h.run_idle(6);
    assert_eq!(sent, vec![ccsc(), wire(test_gtc()), ccsc(), wire(test_clear()), ccsc(), alh(0)]);
}

#[test]
fn test_solicited_reply_collected() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    let (outcomes, cb) = reply_sink();
    h.channel.enqueue_control(test_ahyc(1), None, 2, Some(cb));

    assert_eq!(h.slot(None), ccsc());
    assert_eq!(h.slot(None), wire(test_ahyc(1)));
    assert!(h.channel.reply_pending());

    // Both reply slots are withdrawn from random access
    assert_eq!(h.slot(Some(0x1111_2222_3333)), ccsc());
    assert_eq!(h.slot(Some(0x4444_5555_6666)), wire(Codeword::Ahy(Ahy::dummy())));

    assert_eq!(*outcomes.borrow(), vec![ReplyOutcome::Success(vec![0x1111_2222_3333, 0x4444_5555_6666])]);
    assert!(!h.channel.reply_pending());
    assert_eq!(h.request_count(), 0);

    // Reservation over, back to plain Aloha
    assert_eq!(h.run_idle(2), vec![ccsc(), alh(0)]);
}

#[test]
fn test_solicited_reply_timeout() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    let (outcomes, cb) = reply_sink();
    h.channel.enqueue_control(test_ahyc(0), None, 1, Some(cb));

    h.run_idle(2);
    // Four idle transmit ticks after the reserving codeword
    h.run_idle(3);
    assert!(outcomes.borrow().is_empty());
    assert!(h.channel.reply_pending());

    h.tx();
    assert_eq!(*outcomes.borrow(), vec![ReplyOutcome::Timeout]);
    assert!(!h.channel.reply_pending());

    // Late reply is random access again
    h.channel.rx_tick(Rqr { pfix: 0x10, ident1: 42, info: 1, rsvd: 0 }.to_cw());
    assert_eq!(h.request_count(), 1);
    assert_eq!(outcomes.borrow().len(), 1);
}

#[test]
fn test_queue_waits_for_reserved_slots() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    let (outcomes, cb) = reply_sink();
    h.channel.enqueue_control(test_ahyc(1), None, 2, Some(cb));
    h.channel.enqueue_control(test_gtc(), None, 0, None);

    assert_eq!(h.slot(None), ccsc());
    assert_eq!(h.slot(None), wire(test_ahyc(1)));
    assert_eq!(h.slot(Some(0x1111_2222_3333)), ccsc());
    // Second reserved slot goes to the filler, not the queued GTC
    assert_eq!(h.slot(Some(0x4444_5555_6666)), wire(Codeword::Ahy(Ahy::dummy())));
    assert_eq!(h.channel.queue_lengths(), (1, 0));

    assert_eq!(h.run_idle(2), vec![ccsc(), wire(test_gtc())]);
    assert_eq!(outcomes.borrow().len(), 1);
    assert!(matches!(outcomes.borrow()[0], ReplyOutcome::Success(_)));
}

#[test]
fn test_partial_reply_times_out() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    let (outcomes, cb) = reply_sink();
    h.channel.enqueue_control(test_ahyc(1), None, 2, Some(cb));

    h.run_idle(2);
    h.slot(Some(0x1111_2222_3333));
    // The window restarts on the codeword that did arrive
    h.run_idle(3);
    assert!(outcomes.borrow().is_empty());
    assert!(h.channel.reply_pending());

    h.tx();
    assert_eq!(*outcomes.borrow(), vec![ReplyOutcome::Timeout]);
    assert!(!h.channel.reply_pending());

    // Nothing more reaches the callback once it has fired
    h.channel.rx_tick(0x4444_5555_6666);
    h.run_idle(8);
    assert_eq!(*outcomes.borrow(), vec![ReplyOutcome::Timeout]);
}

#[test]
fn test_superseded_reply_times_out() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    for label in ["first", "second"] {
        let sink = outcomes.clone();
        let cb: mpt_entities::ReplyCallback = Box::new(move |_: &mut Channel, outcome: ReplyOutcome| {
            sink.borrow_mut().push((label, outcome));
        });
        h.channel.enqueue_control(test_ahyc(0), None, 1, Some(cb));
    }

    let sent = h.run_idle(4);
    assert_eq!(sent, vec![ccsc(), wire(test_ahyc(0)), ccsc(), wire(test_ahyc(0))]);

    // The second collector takes over while the first is still listening
    h.tx();
    assert_eq!(*outcomes.borrow(), vec![("first", ReplyOutcome::Timeout)]);

    h.run_idle(20);
    assert_eq!(
        *outcomes.borrow(),
        vec![("first", ReplyOutcome::Timeout), ("second", ReplyOutcome::Timeout)]
    );
    assert!(!h.channel.reply_pending());
}

#[test]
fn test_random_access_reaches_handler() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    let rqr = Rqr { pfix: 0x10, ident1: 77, info: 12345, rsvd: 5 };

    h.slot(Some(rqr.to_cw()));
    // Not a valid inbound codeword: bit 47 clear
    h.slot(Some(0x3201_9023_AAAA));
    // Bits above the codeword are ignored
    h.slot(Some(rqr.to_cw() | 0xFFFF_0000_0000_0000));

    let requests = h.requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], Codeword::Rqr(rqr));
    assert_eq!(requests[1], Codeword::Rqr(rqr));
}

#[test]
fn test_handler_replies_next_frame() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.set_handler(Box::new(|ch: &mut Channel, msg: Codeword| {
        if let Codeword::Rqr(rqr) = msg {
            let ack = Ack::new(AckFunction::Ack, rqr.pfix, rqr.ident1, TSCI);
            ch.enqueue_control(Codeword::Ack(ack), None, 0, None);
        }
    }));

    let rqr = Rqr { pfix: 0x10, ident1: 77, info: 12345, rsvd: 5 };
    assert_eq!(h.slot(Some(rqr.to_cw())), ccsc());
    let expected = Ack::new(AckFunction::Ack, 0x10, 77, TSCI);
    assert_eq!(h.slot(None), wire(Codeword::Ack(expected)));
    assert_eq!(h.channel.queue_lengths(), (0, 0));
}

#[test]
fn test_gtc_moves_channel_to_traffic() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.enqueue_control(
        test_gtc(),
        Some(Box::new(|_: &mut Channel| Some(ChannelState::TrafficQuiescent))),
        0,
        None,
    );
    h.channel.enqueue_traffic(test_clear(), None, 0, None);

    let sent = h.run_idle(5);
    assert_eq!(sent, vec![ccsc(), wire(test_gtc()), Some(TRAFFIC_SYNC_WORD), wire(test_clear()), None]);
    assert_eq!(h.channel.state(), ChannelState::TrafficQuiescent);
    assert_eq!(h.channel.aloha_counter(), 0);
}

#[test]
fn test_traffic_channel_quiescent_until_queued() {
    debug::setup_logging_verbose();
    let mut cfg = default_test_channel();
    cfg.role = ChannelRole::Traffic;
    let mut h = ChannelHarness::new(cfg);

    assert_eq!(h.run_idle(3), vec![None, None, None]);
    h.channel.enqueue_traffic(test_clear(), None, 0, None);
    h.channel.enqueue_traffic(test_gtc(), None, 0, None);
    let sent = h.run_idle(5);
    assert_eq!(
        sent,
        vec![Some(TRAFFIC_SYNC_WORD), wire(test_clear()), Some(TRAFFIC_SYNC_WORD), wire(test_gtc()), None]
    );
}

#[test]
fn test_traffic_fault_contained() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.force_state(ChannelState::TrafficCodeword);
    assert_eq!(h.tx(), None);
    assert_eq!(h.channel.state(), ChannelState::TrafficQuiescent);

    // The channel carries on
    h.channel.force_state(ChannelState::Decide);
    assert_eq!(h.tx(), ccsc());
}

#[test]
fn test_ident_at_start() {
    debug::setup_logging_verbose();
    let mut cfg = default_test_channel();
    cfg.ident = Some("tsc 1".to_string());
    let mut h = ChannelHarness::new(cfg);
    assert!(h.channel.ident_pending());

    assert_eq!(h.run_idle(3), vec![None, None, None]);
    assert_eq!(h.channel.state(), ChannelState::IdentSequence);
    assert_eq!(*h.modem_calls.borrow(), vec![ModemCall::Start, ModemCall::Ident("TSC 1".to_string())]);

    h.channel.ident_done();
    assert_eq!(h.run_idle(2), vec![ccsc(), alh(5)]);
}

#[test]
fn test_ident_waits_for_frame_boundary() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.run_idle(2);
    h.channel.set_ident("TSC");

    // Rest of the Aloha frame goes out first
    let sent = h.run_idle(8);
    assert_eq!(sent, vec![ccsc(), alh(0), ccsc(), alh(0), ccsc(), alh(0), ccsc(), alh(0)]);
    assert!(h.channel.ident_pending());

    assert_eq!(h.tx(), None);
    assert!(!h.channel.ident_pending());
    assert_eq!(h.channel.state(), ChannelState::IdentSequence);
}

#[test]
fn test_stopped_channel_ignores_ticks() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.enqueue_control(test_gtc(), None, 0, None);
    h.channel.stop().unwrap();
    assert!(!h.channel.is_running());

    let rqr = Rqr { pfix: 0, ident1: 1, info: 0, rsvd: 0 };
    assert_eq!(h.slot(Some(rqr.to_cw())), None);
    assert_eq!(h.request_count(), 0);
    assert_eq!(h.channel.queue_lengths(), (1, 0));

    h.channel.start().unwrap();
    assert_eq!(h.run_idle(2), vec![ccsc(), wire(test_gtc())]);
    assert_eq!(*h.modem_calls.borrow(), vec![ModemCall::Start, ModemCall::Stop, ModemCall::Start]);
}

#[test]
fn test_bridge_forwarded() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    h.channel.bridge(true).unwrap();
    h.channel.bridge(false).unwrap();
    assert_eq!(
        *h.modem_calls.borrow(),
        vec![ModemCall::Start, ModemCall::Bridge(true), ModemCall::Bridge(false)]
    );
}

#[test]
fn test_downlink_shaped_words_dropped() {
    debug::setup_logging_verbose();
    let mut h = ChannelHarness::new(default_test_channel());
    for _ in 0..200 {
        // Bit 26 clear: GTC layout, never sent by a radio unit
        let cw = (rand::random::<u64>() | (1 << 47)) & !(1 << 26);
        h.channel.rx_tick(cw);
    }
    assert_eq!(h.request_count(), 0);
}
