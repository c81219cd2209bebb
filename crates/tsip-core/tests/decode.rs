use std::collections::BTreeMap;
use std::time::Duration;

use tsip_core::{
    DecodeError, FixType, MinorAlarms, Packet, PacketKind, SignalLevel, TimingFlags,
    decode_packet,
};

// Id byte followed by the body, as logged from a Resolution-T.
fn payload(hex: &str) -> (u8, Vec<u8>) {
    let bytes: Vec<u8> = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("hex"))
        .collect();
    let (&id, body) = bytes.split_first().expect("id byte");
    (id, body.to_vec())
}

fn decode(hex: &str) -> Result<Packet, DecodeError> {
    let (id, body) = payload(hex);
    decode_packet(id, &body)
}

#[test]
fn all_in_view_with_satellites() {
    let Ok(Packet::AllInView(aiv)) = decode("6d2d000000000000000000000000000000000812") else {
        panic!("expected all-in-view");
    };
    assert_eq!(aiv.status, FixType::OverdeterminedClock);
    assert!(aiv.auto_fix);
    assert_eq!((aiv.pdop, aiv.hdop, aiv.vdop, aiv.tdop), (0.0, 0.0, 0.0, 0.0));
    assert_eq!(aiv.satellites, vec![8, 18]);
}

#[test]
fn all_in_view_without_prn_bytes() {
    let Ok(Packet::AllInView(aiv)) = decode("6d0d00000000000000000000000000000000") else {
        panic!("expected all-in-view");
    };
    assert_eq!(aiv.status, FixType::OverdeterminedClock);
    assert!(aiv.satellites.is_empty());

    let Ok(Packet::AllInView(aiv)) = decode("6d2d0000000000000000000000000000000000") else {
        panic!("expected all-in-view");
    };
    assert!(aiv.auto_fix);
    assert!(aiv.satellites.is_empty());
}

#[test]
fn signal_levels() {
    let Ok(Packet::SignalLevel(levels)) = decode(
        "470b08c1ad999a0b4236000007420d999a138000000011c1ad999a164228000012422333331c42040000\
         03800000001e42200000014240cccd",
    ) else {
        panic!("expected signal levels");
    };
    let expected: BTreeMap<u8, f32> = [
        (1, 48.2),
        (3, -0.0),
        (7, 35.4),
        (8, -21.7),
        (11, 45.5),
        (17, -21.7),
        (18, 40.8),
        (19, -0.0),
        (22, 42.0),
        (28, 33.0),
        (30, 40.0),
    ]
    .into_iter()
    .collect();

    assert_eq!(levels.len(), expected.len());
    for (prn, value) in expected {
        assert_eq!(levels[&prn], SignalLevel(value), "PRN {prn}");
        assert_eq!(
            levels[&prn].value().is_sign_negative(),
            value.is_sign_negative()
        );
    }
}

#[test]
fn raw_measurement() {
    let Ok(Packet::RawMeasurement(raw)) =
        decode("5a0b3f80000042360000467ae59ec1d784db410f6a9820000000")
    else {
        panic!("expected raw measurement");
    };
    assert_eq!(raw.prn, 11);
    assert_eq!(raw.sample_length, Duration::from_millis(1));
    assert_eq!(raw.signal_level, SignalLevel(45.5));
    assert_eq!(raw.code_phase, 16_057.404);
    assert_eq!(raw.doppler, -26.939_87);
    assert_eq!(raw.time_of_measurement, Duration::from_secs(257_363));
}

#[test]
fn primary_timing() {
    let Ok(Packet::PrimaryTiming(timing)) = decode("8fab0003ed5307ca001203051d171b0307e2") else {
        panic!("expected primary timing");
    };
    assert_eq!(timing.time_of_week, 257_363);
    assert_eq!(timing.week_number, 1994);
    assert_eq!(timing.utc_offset, 18);
    assert_eq!(timing.flags, TimingFlags::UTC_TIME | TimingFlags::UTC_PPS);
    assert_eq!(
        (timing.hours, timing.minutes, timing.seconds),
        (23, 29, 5)
    );
    assert_eq!(
        (timing.day_of_month, timing.month, timing.year),
        (27, 3, 2018)
    );
}

#[test]
fn supplemental_timing() {
    let Ok(Packet::SupplementalTiming(timing)) = decode(
        "8fac07000000000000000000000000000047b1fb25449e96310000000000000000420b\
         baa000000000000000000000000000000000000000000000000041894b4700000000",
    ) else {
        panic!("expected supplemental timing");
    };
    assert_eq!(timing.receiver_mode, 7);
    assert_eq!(timing.self_survey_progress, 0);
    assert_eq!(timing.minor_alarms, MinorAlarms::empty());
    assert_eq!(timing.decoding_status, 0);
    assert_eq!(timing.clock_bias, 91_126.29);
    assert_eq!(timing.clock_bias_rate, 1_268.693_5);
    assert_eq!(timing.temperature, 34.932_25);
    assert_eq!((timing.latitude, timing.longitude, timing.altitude), (0.0, 0.0, 0.0));
    assert_eq!(timing.quantization_error, 17.161_757);
}

#[test]
fn tracking_status() {
    let Ok(Packet::TrackingStatus(status)) =
        decode("5c1a0000000000000048eaa7223dcd2a814054981101000001")
    else {
        panic!("expected tracking status");
    };
    assert_eq!(status.prn, 26);
    assert_eq!(status.channel, 0);
    assert_eq!(status.signal_level, SignalLevel(0.0));
    assert_eq!(status.last_measurement, 480_569.06);
    assert_eq!(status.elevation, 0.100_178_726);
    assert_eq!(status.azimuth, 3.321_781_4);
    assert!(status.old_measurement);
    assert!(!status.bad_data);
    assert!(!status.data_collection);
}

#[test]
fn unknown_ids_are_reported_as_unknown() {
    assert_eq!(decode("4200"), Ok(Packet::Unknown(0x42)));
    assert_eq!(decode("8f20"), Ok(Packet::Unknown(0x8f)));
}

#[test]
fn truncated_vectors_are_malformed() {
    let vectors = [
        ("6d2d000000000000000000000000000000000812", PacketKind::AllInView, 17),
        ("5a0b3f80000042360000467ae59ec1d784db410f6a9820000000", PacketKind::RawMeasurement, 25),
        ("8fab0003ed5307ca001203051d171b0307e2", PacketKind::PrimaryTiming, 17),
        ("5c1a0000000000000048eaa7223dcd2a814054981101000001", PacketKind::TrackingStatus, 24),
    ];
    for (hex, kind, min_len) in vectors {
        let (id, body) = payload(hex);
        let err = decode_packet(id, &body[..min_len - 1]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                kind,
                expected_min_len: min_len,
                actual_len: min_len - 1,
            },
            "{kind}"
        );
    }
}
