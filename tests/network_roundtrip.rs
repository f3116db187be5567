use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::tempdir;

use sn_convert::convert::{run_network, NetworkConfig, NetworkDirection};
use sn_convert::network::{self, decode, encode_binary, from_json, to_json};
use sn_convert::{Connection, ErrorKind, Layer, Network, Neuron};

fn random_network(rng: &mut StdRng) -> Network {
    let layers = (0..rng.gen_range(0..5))
        .map(|_| Layer {
            neurons: (0..rng.gen_range(0..6))
                .map(|_| Neuron {
                    bias: rng.gen_range(-10.0..10.0),
                    connections: (0..rng.gen_range(0..8))
                        .map(|_| Connection { target: rng.gen(), weight: rng.gen_range(-1e3..1e3) })
                        .collect(),
                })
                .collect(),
        })
        .collect();
    Network::new(layers)
}

#[test]
fn decoded_values_survive_json_exactly() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let original = random_network(&mut rng);
        let decoded = decode(&encode_binary(&original)).unwrap();
        assert_eq!(decoded, original);

        let back = from_json(&to_json(&decoded).unwrap()).unwrap();
        assert_eq!(back.layer_count(), original.layer_count());
        assert_eq!(back.neuron_count(), original.neuron_count());
        assert_eq!(back.connection_count(), original.connection_count());
        for (a, b) in original.neurons().zip(back.neurons()) {
            assert_eq!(a.bias.to_bits(), b.bias.to_bits());
            for (x, y) in a.connections.iter().zip(&b.connections) {
                assert_eq!(x.target, y.target);
                assert_eq!(x.weight.to_bits(), y.weight.to_bits());
            }
        }
    }
}

#[test]
fn binary_is_stable_across_decode_and_encode() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let bytes = encode_binary(&random_network(&mut rng));
        assert_eq!(encode_binary(&decode(&bytes).unwrap()), bytes);
    }
}

#[test]
fn file_conversion_in_both_directions() {
    let dir = tempdir().unwrap();
    let sn = dir.path().join("net.sn");
    let json = dir.path().join("net.json");
    let sn_again = dir.path().join("net_again.sn");

    let network = random_network(&mut StdRng::seed_from_u64(3));
    network::write_network(&sn, &network).unwrap();

    let decoded = run_network(&NetworkConfig::new(&sn, &json)).unwrap();
    assert_eq!(decoded, network);
    assert!(std::fs::read_to_string(&json).unwrap().starts_with("{\n    \"layers\""));

    let config = NetworkConfig::new(&json, &sn_again).with_direction(NetworkDirection::JsonToBinary);
    run_network(&config).unwrap();
    assert_eq!(std::fs::read(&sn).unwrap(), std::fs::read(&sn_again).unwrap());
}

#[test]
fn truncated_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let sn = dir.path().join("cut.sn");
    let network = Network::new(vec![Layer {
        neurons: vec![Neuron { bias: 1.0, connections: vec![Connection { target: 0, weight: 2.0 }] }],
    }]);
    let bytes = encode_binary(&network);
    std::fs::write(&sn, &bytes[..bytes.len() - 4]).unwrap();

    let err = run_network(&NetworkConfig::new(&sn, dir.path().join("out.json"))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!dir.path().join("out.json").exists());
}

#[test]
fn missing_input_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = network::read_network(dir.path().join("absent.sn")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn non_finite_reals_survive_binary_json_binary() {
    let dir = tempdir().unwrap();
    let sn = dir.path().join("diverged.sn");
    let json = dir.path().join("diverged.json");
    let sn_again = dir.path().join("diverged_again.sn");

    let network = Network::new(vec![Layer {
        neurons: vec![
            Neuron {
                bias: f64::NAN,
                connections: vec![
                    Connection { target: 0, weight: f64::INFINITY },
                    Connection { target: 1, weight: f64::NEG_INFINITY },
                ],
            },
            Neuron { bias: f64::NEG_INFINITY, connections: vec![Connection { target: 2, weight: f64::NAN }] },
        ],
    }]);
    let bytes = encode_binary(&network);
    std::fs::write(&sn, &bytes).unwrap();

    run_network(&NetworkConfig::new(&sn, &json)).unwrap();
    let text = std::fs::read_to_string(&json).unwrap();
    assert!(text.contains("NaN") && text.contains("-Infinity"), "{text}");
    assert!(!text.contains("null"), "{text}");

    let config = NetworkConfig::new(&json, &sn_again).with_direction(NetworkDirection::JsonToBinary);
    run_network(&config).unwrap();
    assert_eq!(std::fs::read(&sn_again).unwrap(), bytes);
}
