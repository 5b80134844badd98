pub mod mock_ports;
